//! # Protocol Configuration & Constants
//!
//! Every wire code and key length the authenticator relies on lives here,
//! together with [`AuthConfig`], the handful of knobs a host may tune.
//!
//! The wire codes are shared with the token plugin on the ledger side.
//! Changing them breaks every wallet that already signs requests, so don't.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Wire Codes
// ---------------------------------------------------------------------------

/// Transaction type code for minting new tokens.
pub const MINT_PUBLIC: &str = "10000";

/// Transaction type code for spending outputs into new outputs.
pub const XFER_PUBLIC: &str = "10001";

/// Top-level request field naming the submitter.
pub const IDENTIFIER: &str = "identifier";

/// Top-level field carrying a single request signature.
pub const SIGNATURE: &str = "signature";

/// Top-level field carrying a `{identifier: signature}` map.
pub const SIGNATURES: &str = "signatures";

/// Top-level field for fee payloads. Fees are signed separately.
pub const FEES: &str = "fees";

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Public (verifying) key length in bytes.
pub const VERKEY_LENGTH: usize = 32;

/// Ed25519 signature length. Always 64 bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// DIDs are the base58 form of the first 16 bytes of a verkey.
pub const DID_LENGTH: usize = 16;

/// Prefix marking an abbreviated verkey (the last 16 bytes only).
pub const ABBREVIATED_VERKEY_PREFIX: char = '~';

/// Text lengths a base58-encoded 32-byte key can have.
///
/// An address of one of these lengths is its own verkey; anything else is
/// an identifier that has to be resolved through the registry.
pub const SELF_CERTIFYING_LENGTHS: [usize; 2] = [43, 44];

// ---------------------------------------------------------------------------
// AuthConfig
// ---------------------------------------------------------------------------

/// Runtime configuration for the authenticators.
///
/// Loaded from JSON by the CLI, or built with [`AuthConfig::default`] in
/// embedded use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthConfig {
    /// Top-level request keys never covered by a signature.
    pub excluded_from_signing: BTreeSet<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            excluded_from_signing: [SIGNATURE, SIGNATURES, FEES]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl AuthConfig {
    /// Parse a configuration document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Adds a top-level key to the signing exclusion set.
    pub fn with_excluded_key(mut self, key: impl Into<String>) -> Self {
        self.excluded_from_signing.insert(key.into());
        self
    }
}
