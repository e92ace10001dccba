//! Routes a request to the authenticator its type calls for.

use tracing::{info, instrument, warn};

use super::default::authenticate_default;
use super::transfer::authenticate_transfer;
use super::{AuthError, SignerSet};
use crate::config::AuthConfig;
use crate::identity::KeyRegistry;
use crate::transaction::{canonical_view, serialize_for_signing, Request, TransactionType};

/// Authenticator for token requests.
///
/// Holds a registry handle and configuration, nothing mutable, so one
/// instance can be shared (`Arc`) across every worker admitting requests.
///
/// # Example
///
/// ```
/// use token_authn::auth::{AuthError, TokenAuthenticator};
/// use token_authn::config::AuthConfig;
/// use token_authn::identity::MemoryKeyRegistry;
/// use token_authn::transaction::RequestBuilder;
///
/// let authn = TokenAuthenticator::new(MemoryKeyRegistry::new(), AuthConfig::default());
/// let unsigned = RequestBuilder::mint().req_id(1).output("addr", 5).build();
/// assert!(matches!(authn.authenticate(&unsigned), Err(AuthError::MissingSignature)));
/// ```
#[derive(Debug)]
pub struct TokenAuthenticator<R> {
    registry: R,
    config: AuthConfig,
}

impl<R: KeyRegistry> TokenAuthenticator<R> {
    pub fn new(registry: R, config: AuthConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Returns the identities whose signatures on `request` verified.
    ///
    /// - Mint: the default DID check over the whole request.
    /// - Transfer: the per-input check.
    ///
    /// Role and threshold policy is the caller's business; this only says
    /// who signed.
    #[instrument(level = "debug", skip_all, fields(txn_type = %request.txn_type(), req_id = request.req_id))]
    pub fn authenticate(&self, request: &Request) -> Result<SignerSet, AuthError> {
        let outcome = match request.txn_type() {
            TransactionType::Mint => {
                authenticate_default(request, None, None, &self.registry, &self.config)
            }
            TransactionType::Transfer => {
                authenticate_transfer(request, &self.registry, &self.config)
            }
        };

        match &outcome {
            Ok(signers) => info!(signers = signers.len(), "request authenticated"),
            Err(e) => warn!(error = %e, "request rejected"),
        }
        outcome
    }

    /// The bytes `identifier` is expected to sign for `request`.
    ///
    /// For a transfer this is the signer's canonical view; for a mint it is
    /// the whole request. Wallets call this before signing; the
    /// authenticators recompute exactly the same bytes.
    pub fn serialize_for_sig(
        &self,
        request: &Request,
        identifier: &str,
    ) -> Result<Vec<u8>, AuthError> {
        let excluded = &self.config.excluded_from_signing;
        let bytes = match request.txn_type() {
            TransactionType::Mint => serialize_for_signing(request, excluded)?,
            TransactionType::Transfer => canonical_view(request, identifier, excluded)?,
        };
        Ok(bytes)
    }
}
