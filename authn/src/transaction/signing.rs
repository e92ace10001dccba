//! Client-side signing.
//!
//! What a wallet does before submitting a request. These helpers use the
//! same serializers the authenticator recomputes on the ledger side, so a
//! request signed here verifies there byte for byte.

use std::collections::BTreeMap;

use super::serialization::{canonical_view, serialize_for_signing};
use super::types::Request;
use crate::config::AuthConfig;
use crate::crypto::SigningKeypair;

/// Signs every transfer input owned by one of `keypairs`.
///
/// Each keypair signs its own canonical view once; the signature is then
/// written into every input that address owns. Inputs owned by addresses
/// without a keypair here are left alone, so several wallets can sign the
/// same request in turn.
///
/// Returns the number of inputs signed.
pub fn sign_transfer_inputs(
    request: &mut Request,
    keypairs: &[SigningKeypair],
    config: &AuthConfig,
) -> Result<usize, serde_json::Error> {
    let mut signed = 0;
    for keypair in keypairs {
        let address = keypair.address();
        let view = canonical_view(request, &address, &config.excluded_from_signing)?;
        let signature = keypair.sign_base58(&view);

        for input in request
            .operation
            .inputs
            .iter_mut()
            .filter(|input| input.address == address)
        {
            input.signature = signature.clone();
            signed += 1;
        }
    }
    Ok(signed)
}

/// Signs `request` as its single submitter.
///
/// Sets `identifier` to the keypair's DID and `signature` to a signature
/// over the default serialization.
pub fn sign_request<'a>(
    request: &'a mut Request,
    keypair: &SigningKeypair,
    config: &AuthConfig,
) -> Result<&'a Request, serde_json::Error> {
    request.identifier = Some(keypair.did());
    let payload = serialize_for_signing(request, &config.excluded_from_signing)?;
    request.signature = Some(keypair.sign_base58(&payload));
    Ok(request)
}

/// Adds the keypair's signature to the request's multi-signature map.
///
/// The signer is identified by its DID. `identifier`, if unset, becomes the
/// first signer's DID.
pub fn add_request_signature<'a>(
    request: &'a mut Request,
    keypair: &SigningKeypair,
    config: &AuthConfig,
) -> Result<&'a Request, serde_json::Error> {
    let did = keypair.did();
    if request.identifier.is_none() {
        request.identifier = Some(did.clone());
    }
    let payload = serialize_for_signing(request, &config.excluded_from_signing)?;
    request
        .signatures
        .get_or_insert_with(BTreeMap::new)
        .insert(did, keypair.sign_base58(&payload));
    Ok(request)
}
