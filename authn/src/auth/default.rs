//! The default authenticator for DID-signed requests.
//!
//! This is how the ledger checks ordinary writes, mints included: the
//! request is signed as a whole, either once by its `identifier` or by
//! several DIDs through the `signatures` map. Each signer's verkey comes
//! from the registry and is trusted as-is, abbreviated or not; there is no
//! address-based shortcut on this path.

use std::collections::BTreeMap;

use tracing::debug;

use super::{decode_signature, AuthError, SignerSet};
use crate::config::AuthConfig;
use crate::crypto::{DidVerifier, SignatureVerifier};
use crate::identity::KeyRegistry;
use crate::transaction::{serialize_for_signing, Request};

/// Authenticates a request signed over its full signing serialization.
///
/// Signatures are taken from, in order of preference:
///
/// 1. the explicit `signature` argument, attributed to `identifier` (or the
///    request's own `identifier` if none is given),
/// 2. the request's `signatures` map,
/// 3. the request's `identifier` + `signature` pair.
///
/// Every signature must verify. Returns the identifiers that signed.
pub fn authenticate_default<R>(
    request: &Request,
    identifier: Option<&str>,
    signature: Option<&str>,
    registry: &R,
    config: &AuthConfig,
) -> Result<SignerSet, AuthError>
where
    R: KeyRegistry + ?Sized,
{
    let signatures = collect_signatures(request, identifier, signature)?;
    let payload = serialize_for_signing(request, &config.excluded_from_signing)?;

    let mut correct = 0usize;
    let mut signers = SignerSet::new();

    for (&idr, &sig) in &signatures {
        let sig = decode_signature(idr, sig)?;
        let verkey = registry
            .resolve_key(idr)
            .ok_or_else(|| AuthError::VerifierNotFound {
                identifier: idr.to_string(),
            })?;
        let verifier =
            DidVerifier::new(&verkey, Some(idr)).map_err(|source| AuthError::InvalidVerkey {
                identifier: idr.to_string(),
                source,
            })?;

        if verifier.verify(&sig, &payload) {
            correct += 1;
            signers.insert(idr.to_string());
        } else {
            debug!(identifier = %idr, "request signature did not verify");
        }
    }

    if correct < signatures.len() {
        return Err(AuthError::InsufficientCorrectSignatures {
            correct,
            required: signatures.len(),
        });
    }

    Ok(signers)
}

fn collect_signatures<'a>(
    request: &'a Request,
    identifier: Option<&'a str>,
    signature: Option<&'a str>,
) -> Result<BTreeMap<&'a str, &'a str>, AuthError> {
    if let Some(sig) = signature {
        let idr = identifier
            .or(request.identifier.as_deref())
            .ok_or(AuthError::MissingIdentifier)?;
        return Ok(BTreeMap::from([(idr, sig)]));
    }

    if let Some(map) = request.signatures.as_ref().filter(|m| !m.is_empty()) {
        return Ok(map
            .iter()
            .map(|(idr, sig)| (idr.as_str(), sig.as_str()))
            .collect());
    }

    match (request.identifier.as_deref(), request.signature.as_deref()) {
        (Some(idr), Some(sig)) => Ok(BTreeMap::from([(idr, sig)])),
        (None, Some(_)) => Err(AuthError::MissingIdentifier),
        (_, None) => Err(AuthError::MissingSignature),
    }
}
