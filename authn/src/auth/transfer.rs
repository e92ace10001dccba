//! Per-input authentication of transfer requests.
//!
//! Every input carries a signature by the address that owns the spent
//! output, made over that address's [canonical view](crate::transaction::canonical_view)
//! of the request. The request is admitted only if *every* input verifies.
//!
//! Processing is in input order:
//!
//! 1. decode the base58 signature (failure aborts the call),
//! 2. build the owner's canonical view,
//! 3. resolve the owner's verkey, the address itself when it is
//!    self-certifying and the registry otherwise (a miss aborts the call),
//! 4. verify, counting successes. A key that decodes to 32 bytes off the
//!    curve verifies nothing and is counted as a failure.
//!
//! Only after the last input is the count compared against the number of
//! inputs. Failing late lets the error say *how many* signatures were good,
//! which is what the ledger reports back to the client.
//!
//! An address that funds several inputs signs one view covering all of them,
//! so the same signature is checked once per input. That repetition is
//! harmless: verification is idempotent.

use tracing::{debug, warn};

use super::{decode_signature, AuthError, SignerSet};
use crate::config::AuthConfig;
use crate::crypto::{AddressVerifier, SignatureVerifier, VerkeyError};
use crate::identity::{resolve_address_verkey, KeyRegistry};
use crate::transaction::{canonical_view, Request};

/// Authenticates a transfer request input by input.
///
/// Returns the set of addresses that signed. The set is deduplicated, but
/// the all-or-nothing check counts inputs, not addresses.
///
/// # Errors
///
/// - [`AuthError::MalformedSignature`] on the first signature that is not
///   base58.
/// - [`AuthError::VerifierNotFound`] for an address that is neither
///   self-certifying nor known to `registry`.
/// - [`AuthError::InvalidVerkey`] if the resolved key is not base58 or has
///   the wrong length.
/// - [`AuthError::InsufficientCorrectSignatures`] if any input failed to
///   verify.
pub fn authenticate_transfer<R>(
    request: &Request,
    registry: &R,
    config: &AuthConfig,
) -> Result<SignerSet, AuthError>
where
    R: KeyRegistry + ?Sized,
{
    let inputs = &request.operation.inputs;
    let mut correct = 0usize;
    let mut signers = SignerSet::new();

    for input in inputs {
        let address = input.address.as_str();
        let signature = decode_signature(address, &input.signature)?;
        let view = canonical_view(request, address, &config.excluded_from_signing)?;

        let verkey = resolve_address_verkey(address, registry).ok_or_else(|| {
            AuthError::VerifierNotFound {
                identifier: address.to_string(),
            }
        })?;
        // Right length but off the curve: nothing can verify under it, so
        // the input counts as unsigned rather than aborting the call.
        let verified = match AddressVerifier::new(&verkey) {
            Ok(verifier) => verifier.verify(&signature, &view),
            Err(VerkeyError::InvalidPoint) => false,
            Err(source) => {
                return Err(AuthError::InvalidVerkey {
                    identifier: address.to_string(),
                    source,
                })
            }
        };

        if verified {
            correct += 1;
            signers.insert(address.to_string());
        } else {
            debug!(address, seq_no = input.seq_no, "input signature did not verify");
        }
    }

    if correct < inputs.len() {
        warn!(
            req_id = request.req_id,
            correct,
            required = inputs.len(),
            "transfer rejected: not every input is signed"
        );
        return Err(AuthError::InsufficientCorrectSignatures {
            correct,
            required: inputs.len(),
        });
    }

    Ok(signers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SigningKeypair;
    use crate::identity::MemoryKeyRegistry;
    use crate::transaction::{sign_transfer_inputs, RequestBuilder};

    fn config() -> AuthConfig {
        AuthConfig::default()
    }

    fn signed_pair() -> (Request, SigningKeypair, SigningKeypair) {
        let x = SigningKeypair::generate();
        let y = SigningKeypair::generate();
        let mut req = RequestBuilder::transfer()
            .req_id(11)
            .input(x.address(), 1)
            .input(y.address(), 2)
            .output("dest", 20)
            .build();
        sign_transfer_inputs(&mut req, &[x.clone(), y.clone()], &config()).unwrap();
        (req, x, y)
    }

    #[test]
    fn all_inputs_signed_returns_every_address() {
        let (req, x, y) = signed_pair();
        let signers = authenticate_transfer(&req, &MemoryKeyRegistry::new(), &config()).unwrap();
        let expected: SignerSet = [x.address(), y.address()].into_iter().collect();
        assert_eq!(signers, expected);
    }

    #[test]
    fn one_bad_signature_is_counted_not_raised_early() {
        let (mut req, _, _) = signed_pair();
        // Valid base58, wrong bytes.
        req.operation.inputs[1].signature = bs58::encode([7u8; 64]).into_string();

        match authenticate_transfer(&req, &MemoryKeyRegistry::new(), &config()) {
            Err(AuthError::InsufficientCorrectSignatures {
                correct: 1,
                required: 2,
            }) => {}
            other => panic!("expected InsufficientCorrectSignatures(1, 2), got {:?}", other),
        }
    }

    #[test]
    fn malformed_signature_fails_fast() {
        let (mut req, x, _) = signed_pair();
        // First input broken, second one fine: still MalformedSignature.
        req.operation.inputs[0].signature = "0OIl+/".to_string();

        match authenticate_transfer(&req, &MemoryKeyRegistry::new(), &config()) {
            Err(AuthError::MalformedSignature { identifier, .. }) => {
                assert_eq!(identifier, x.address());
            }
            other => panic!("expected MalformedSignature, got {:?}", other),
        }
    }

    #[test]
    fn tampered_output_breaks_every_signature() {
        let (mut req, _, _) = signed_pair();
        req.operation.outputs[0].amount = 2_000;

        match authenticate_transfer(&req, &MemoryKeyRegistry::new(), &config()) {
            Err(AuthError::InsufficientCorrectSignatures {
                correct: 0,
                required: 2,
            }) => {}
            other => panic!("expected InsufficientCorrectSignatures(0, 2), got {:?}", other),
        }
    }

    #[test]
    fn signature_swapped_between_inputs_fails() {
        let (mut req, _, _) = signed_pair();
        let first = req.operation.inputs[0].signature.clone();
        req.operation.inputs[1].signature = first;

        assert!(matches!(
            authenticate_transfer(&req, &MemoryKeyRegistry::new(), &config()),
            Err(AuthError::InsufficientCorrectSignatures {
                correct: 1,
                required: 2
            })
        ));
    }

    #[test]
    fn repeated_address_is_deduplicated() {
        let x = SigningKeypair::generate();
        let mut req = RequestBuilder::transfer()
            .req_id(1)
            .input(x.address(), 1)
            .input(x.address(), 4)
            .output("dest", 5)
            .build();
        sign_transfer_inputs(&mut req, &[x.clone()], &config()).unwrap();

        let signers = authenticate_transfer(&req, &MemoryKeyRegistry::new(), &config()).unwrap();
        assert_eq!(signers.len(), 1);
        assert!(signers.contains(&x.address()));
    }

    #[test]
    fn unknown_short_identifier_is_not_found() {
        let x = SigningKeypair::generate();
        let mut req = RequestBuilder::transfer()
            .req_id(1)
            .input(x.did(), 1)
            .output("dest", 5)
            .build();
        req.operation.inputs[0].signature = bs58::encode([1u8; 64]).into_string();

        match authenticate_transfer(&req, &MemoryKeyRegistry::new(), &config()) {
            Err(AuthError::VerifierNotFound { identifier }) => assert_eq!(identifier, x.did()),
            other => panic!("expected VerifierNotFound, got {:?}", other),
        }
    }

    #[test]
    fn short_identifier_resolves_through_registry() {
        let x = SigningKeypair::generate();
        let mut req = RequestBuilder::transfer()
            .req_id(1)
            .input(x.did(), 1)
            .output("dest", 5)
            .build();
        let view = canonical_view(&req, &x.did(), &config().excluded_from_signing).unwrap();
        req.operation.inputs[0].signature = x.sign_base58(&view);

        let registry = MemoryKeyRegistry::new();
        registry.insert(x.did(), x.address());

        let signers = authenticate_transfer(&req, &registry, &config()).unwrap();
        assert!(signers.contains(&x.did()));
    }

    #[test]
    fn abbreviated_registry_verkey_is_unusable_for_inputs() {
        let x = SigningKeypair::generate();
        let mut req = RequestBuilder::transfer()
            .req_id(1)
            .input(x.did(), 1)
            .output("dest", 5)
            .build();
        req.operation.inputs[0].signature = bs58::encode([1u8; 64]).into_string();
        let registry = MemoryKeyRegistry::new();
        registry.insert(x.did(), x.abbreviated_verkey());

        assert!(matches!(
            authenticate_transfer(&req, &registry, &config()),
            Err(AuthError::InvalidVerkey { .. })
        ));
    }

    #[test]
    fn off_curve_address_is_counted_not_raised() {
        let x = SigningKeypair::generate();
        // 32 bytes, self-certifying length, not a curve point.
        let off_curve = bs58::encode([2u8; 32]).into_string();
        assert!(crate::crypto::Verkey::from_base58(&off_curve).is_err());

        let mut req = RequestBuilder::transfer()
            .req_id(1)
            .input(x.address(), 1)
            .input(off_curve.clone(), 2)
            .output("dest", 5)
            .build();
        sign_transfer_inputs(&mut req, &[x.clone()], &config()).unwrap();
        req.operation.inputs[1].signature = bs58::encode([5u8; 64]).into_string();

        match authenticate_transfer(&req, &MemoryKeyRegistry::new(), &config()) {
            Err(AuthError::InsufficientCorrectSignatures {
                correct: 1,
                required: 2,
            }) => {}
            other => panic!("expected InsufficientCorrectSignatures(1, 2), got {:?}", other),
        }
    }

    #[test]
    fn wrong_length_registry_key_is_still_fatal() {
        let x = SigningKeypair::generate();
        let mut req = RequestBuilder::transfer()
            .req_id(1)
            .input(x.did(), 1)
            .output("dest", 5)
            .build();
        req.operation.inputs[0].signature = bs58::encode([1u8; 64]).into_string();
        let registry = MemoryKeyRegistry::new();
        registry.insert(x.did(), bs58::encode([7u8; 16]).into_string());

        match authenticate_transfer(&req, &registry, &config()) {
            Err(AuthError::InvalidVerkey { source, .. }) => assert_eq!(
                source,
                VerkeyError::InvalidLength {
                    expected: 32,
                    got: 16
                }
            ),
            other => panic!("expected InvalidVerkey, got {:?}", other),
        }
    }

    #[test]
    fn no_inputs_yields_empty_signer_set() {
        let req = RequestBuilder::transfer().req_id(1).output("dest", 5).build();
        let signers = authenticate_transfer(&req, &MemoryKeyRegistry::new(), &config()).unwrap();
        assert!(signers.is_empty());
    }
}
