//! # Cryptographic Primitives
//!
//! Ed25519 keys and signature verification. Thin, typed wrappers around
//! `ed25519-dalek`; nothing here is home-grown cryptography.

pub mod keys;
pub mod signatures;

pub use keys::{KeyError, SigningKeypair, Verkey, VerkeyError};
pub use signatures::{AddressVerifier, DidVerifier, SignatureVerifier};
