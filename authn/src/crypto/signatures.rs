//! # Signature Verification
//!
//! One Ed25519 primitive, two ways of getting a key into it.
//!
//! - [`DidVerifier`] takes a verkey the way the identity registry stores it:
//!   either a full base58 key or an abbreviated `~` key that only makes
//!   sense together with the DID it belongs to. Requests signed by a DID
//!   (mints, and every other write the ledger accepts) are checked with it.
//! - [`AddressVerifier`] takes a payment address. The address *is* the base58
//!   encoding of the key, so it decodes straight into key bytes.
//!
//! Both implement [`SignatureVerifier`]. `verify` only ever answers yes or
//! no: a signature that is the wrong length or does not check out is simply
//! `false`. Whether the signature text could be decoded at all is the
//! caller's problem and surfaces as a different error further up.

use ed25519_dalek::Signature;

use super::keys::{Verkey, VerkeyError};
use crate::config::{ABBREVIATED_VERKEY_PREFIX, SIGNATURE_LENGTH};

/// Something that can check a raw signature over a message.
pub trait SignatureVerifier {
    /// Returns `true` if `signature` is a valid signature of `message`.
    fn verify(&self, signature: &[u8], message: &[u8]) -> bool;

    /// The key this verifier checks against.
    fn verkey(&self) -> &Verkey;
}

/// Strict Ed25519 verification shared by both verifier variants.
///
/// Small-order keys and small-order `R` components are rejected, matching
/// libsodium's `crypto_sign_open`.
fn verify_ed25519(verkey: &Verkey, signature: &[u8], message: &[u8]) -> bool {
    let Ok(bytes) = <[u8; SIGNATURE_LENGTH]>::try_from(signature) else {
        return false;
    };
    let signature = Signature::from_bytes(&bytes);
    verkey
        .verifying_key()
        .verify_strict(message, &signature)
        .is_ok()
}

// ---------------------------------------------------------------------------
// DidVerifier
// ---------------------------------------------------------------------------

/// Verifier built from a registry verkey, optionally abbreviated.
#[derive(Debug, Clone)]
pub struct DidVerifier {
    verkey: Verkey,
}

impl DidVerifier {
    /// Build a verifier from registry verkey text.
    ///
    /// An abbreviated verkey (`~` + base58 of the last 16 key bytes) is
    /// expanded by prepending the decoded `identifier`, which must then be
    /// present.
    pub fn new(verkey: &str, identifier: Option<&str>) -> Result<Self, VerkeyError> {
        let verkey = match verkey.strip_prefix(ABBREVIATED_VERKEY_PREFIX) {
            Some(tail) => {
                let did = identifier.ok_or(VerkeyError::MissingIdentifier)?;
                let mut bytes = decode_base58(did)?;
                bytes.extend(decode_base58(tail)?);
                Verkey::from_slice(&bytes)?
            }
            None => Verkey::from_base58(verkey)?,
        };
        Ok(Self { verkey })
    }
}

impl SignatureVerifier for DidVerifier {
    fn verify(&self, signature: &[u8], message: &[u8]) -> bool {
        verify_ed25519(&self.verkey, signature, message)
    }

    fn verkey(&self) -> &Verkey {
        &self.verkey
    }
}

// ---------------------------------------------------------------------------
// AddressVerifier
// ---------------------------------------------------------------------------

/// Verifier built from a self-certifying payment address.
#[derive(Debug, Clone)]
pub struct AddressVerifier {
    verkey: Verkey,
}

impl AddressVerifier {
    /// Decode `address` into key bytes and wrap them.
    pub fn new(address: &str) -> Result<Self, VerkeyError> {
        Ok(Self {
            verkey: Verkey::from_base58(address)?,
        })
    }
}

impl SignatureVerifier for AddressVerifier {
    fn verify(&self, signature: &[u8], message: &[u8]) -> bool {
        verify_ed25519(&self.verkey, signature, message)
    }

    fn verkey(&self) -> &Verkey {
        &self.verkey
    }
}

fn decode_base58(text: &str) -> Result<Vec<u8>, VerkeyError> {
    bs58::decode(text)
        .into_vec()
        .map_err(|e| VerkeyError::Encoding(e.to_string()))
}
