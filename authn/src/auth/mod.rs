//! # Request Authentication
//!
//! ```text
//! error.rs      - AuthError
//! default.rs    - DID-signed requests (mint and every ordinary write)
//! transfer.rs   - Per-input signatures on transfers
//! dispatcher.rs - TokenAuthenticator: picks one of the two by request type
//! ```
//!
//! Both paths share the same shape: decode, resolve, verify, count, and
//! only then decide. Both return the identities that signed.

pub mod default;
pub mod dispatcher;
pub mod error;
pub mod transfer;

use std::collections::BTreeSet;

pub use default::authenticate_default;
pub use dispatcher::TokenAuthenticator;
pub use error::AuthError;
pub use transfer::authenticate_transfer;

/// Identities whose signatures verified during one call.
pub type SignerSet = BTreeSet<String>;

/// Decode a base58 wire signature, attributing failures to `identifier`.
pub(crate) fn decode_signature(identifier: &str, text: &str) -> Result<Vec<u8>, AuthError> {
    bs58::decode(text)
        .into_vec()
        .map_err(|e| AuthError::MalformedSignature {
            identifier: identifier.to_string(),
            reason: e.to_string(),
        })
}
