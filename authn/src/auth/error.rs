//! Error types for request authentication.
//!
//! The split that matters upstream: *bad input* (a signature that is not
//! even base58, an identity nobody knows) aborts immediately, while *bad
//! cryptography* is only counted and reported once every signature has been
//! looked at, as [`AuthError::InsufficientCorrectSignatures`].

use thiserror::Error;

use crate::crypto::VerkeyError;

/// Errors returned by the authenticators.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A signature is not valid base58. Nothing after it was checked.
    #[error("invalid signature format for {identifier}: {reason}")]
    MalformedSignature {
        /// Address or DID the signature was attached to.
        identifier: String,
        /// Decoder message.
        reason: String,
    },

    /// No verkey could be found for this identifier.
    #[error("can not find verkey for {identifier}")]
    VerifierNotFound {
        /// The address or DID that failed to resolve.
        identifier: String,
    },

    /// A verkey was found but cannot be used to verify anything.
    #[error("unusable verkey for {identifier}: {source}")]
    InvalidVerkey {
        /// The address or DID the verkey belongs to.
        identifier: String,
        #[source]
        source: VerkeyError,
    },

    /// Every signature was checked and not all of them verified.
    #[error("insufficient correct signatures: {correct} out of {required} correct")]
    InsufficientCorrectSignatures {
        /// Signatures that verified.
        correct: usize,
        /// Signatures the request needed.
        required: usize,
    },

    /// The request carries no signature at all.
    #[error("request is not signed")]
    MissingSignature,

    /// A single signature was supplied without saying who made it.
    #[error("signature supplied without an identifier")]
    MissingIdentifier,

    /// The request could not be rendered into its signing bytes.
    #[error("cannot serialize request for signing: {0}")]
    Serialization(#[from] serde_json::Error),
}
