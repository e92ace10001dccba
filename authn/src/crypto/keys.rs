//! # Key Management
//!
//! Ed25519 keypairs and verification keys as the token ledger sees them.
//!
//! Everything on the ledger is base58 text. A 32-byte verification key in
//! base58 doubles as a payment *address*; its first 16 bytes in base58 are
//! the owner's *DID*; and the remaining 16 bytes prefixed with `~` are the
//! *abbreviated verkey* the identity registry stores next to that DID.
//!
//! ## Security considerations
//!
//! - Private keys are zeroized on drop (thanks, ed25519-dalek).
//! - Key generation uses `OsRng`.
//! - Key bytes are never logged. Keep it that way.

use std::fmt;

use ed25519_dalek::{Signer, SigningKey, VerifyingKey, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;
use thiserror::Error;

use crate::config::{ABBREVIATED_VERKEY_PREFIX, DID_LENGTH, VERKEY_LENGTH};

/// Errors that can occur while loading key material.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or not hex")]
    InvalidSecretKey,
}

/// Errors raised while turning verkey text into a usable verification key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerkeyError {
    /// The text is not valid base58.
    #[error("verkey is not valid base58: {0}")]
    Encoding(String),

    /// The decoded bytes have the wrong length.
    #[error("verkey must decode to {expected} bytes, got {got}")]
    InvalidLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes.
        got: usize,
    },

    /// The bytes do not encode a valid Ed25519 point.
    #[error("verkey is not a valid Ed25519 point")]
    InvalidPoint,

    /// An abbreviated verkey was supplied without the DID it abbreviates.
    #[error("abbreviated verkey requires the owning identifier")]
    MissingIdentifier,
}

// ---------------------------------------------------------------------------
// Verkey
// ---------------------------------------------------------------------------

/// A parsed 32-byte Ed25519 verification key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Verkey {
    key: VerifyingKey,
}

impl Verkey {
    /// Parse raw key bytes, rejecting anything that is not a curve point.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, VerkeyError> {
        let arr: [u8; VERKEY_LENGTH] =
            bytes.try_into().map_err(|_| VerkeyError::InvalidLength {
                expected: VERKEY_LENGTH,
                got: bytes.len(),
            })?;
        let key = VerifyingKey::from_bytes(&arr).map_err(|_| VerkeyError::InvalidPoint)?;
        Ok(Self { key })
    }

    /// Parse a full base58 verkey (which is also an address).
    pub fn from_base58(text: &str) -> Result<Self, VerkeyError> {
        let bytes = bs58::decode(text)
            .into_vec()
            .map_err(|e| VerkeyError::Encoding(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Raw key bytes.
    pub fn to_bytes(&self) -> [u8; VERKEY_LENGTH] {
        self.key.to_bytes()
    }

    /// Base58 form of the key. This is the address.
    pub fn to_base58(&self) -> String {
        bs58::encode(self.key.to_bytes()).into_string()
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.key
    }
}

impl fmt::Display for Verkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl fmt::Debug for Verkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Verkey({})", self.to_base58())
    }
}

// ---------------------------------------------------------------------------
// SigningKeypair
// ---------------------------------------------------------------------------

/// An Ed25519 keypair able to sign requests and transfer inputs.
///
/// Intentionally not `Serialize`. Exporting a secret should be a deliberate
/// call to [`SigningKeypair::seed_hex`], not a side effect of logging a
/// struct as JSON.
///
/// # Examples
///
/// ```
/// use token_authn::crypto::SigningKeypair;
///
/// let kp = SigningKeypair::generate();
/// let sig = kp.sign(b"spend output 7");
/// assert!(kp.verkey().to_base58() == kp.address());
/// assert_eq!(sig.len(), 64);
/// ```
pub struct SigningKeypair {
    signing_key: SigningKey,
}

impl SigningKeypair {
    /// Generate a fresh keypair using the OS cryptographic RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Construct a keypair deterministically from a 32-byte seed.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Load a keypair from a hex-encoded seed.
    ///
    /// Fine for devnet wallets and tests. Production keys belong in a wallet.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str.trim()).map_err(|_| KeyError::InvalidSecretKey)?;
        let seed: [u8; SECRET_KEY_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_seed(&seed))
    }

    /// Hex-encoded seed. **Handle with care.**
    pub fn seed_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    /// The verification key.
    pub fn verkey(&self) -> Verkey {
        Verkey {
            key: self.signing_key.verifying_key(),
        }
    }

    /// The self-certifying payment address: the base58 verkey.
    pub fn address(&self) -> String {
        self.verkey().to_base58()
    }

    /// The DID: base58 of the first 16 verkey bytes.
    pub fn did(&self) -> String {
        let bytes = self.signing_key.verifying_key().to_bytes();
        bs58::encode(&bytes[..DID_LENGTH]).into_string()
    }

    /// The abbreviated verkey stored next to [`did`](Self::did) in the registry.
    pub fn abbreviated_verkey(&self) -> String {
        let bytes = self.signing_key.verifying_key().to_bytes();
        format!(
            "{}{}",
            ABBREVIATED_VERKEY_PREFIX,
            bs58::encode(&bytes[DID_LENGTH..]).into_string()
        )
    }

    /// Sign a message, returning the raw 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        self.signing_key.sign(message).to_bytes().to_vec()
    }

    /// Sign a message, returning the signature as base58 text (the wire form).
    pub fn sign_base58(&self, message: &[u8]) -> String {
        bs58::encode(self.sign(message)).into_string()
    }
}

impl Clone for SigningKeypair {
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for SigningKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Public half only.
        write!(f, "SigningKeypair(address={})", self.address())
    }
}
