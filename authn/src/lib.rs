// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Token Request Authenticator
//!
//! Decides whether a token ledger request carries the signatures it needs.
//! Two request types matter here:
//!
//! - **Mint** requests are signed once by the submitting DID, exactly like
//!   any other ledger write. They go through the default single-signer path.
//! - **Transfer** requests spend unspent outputs, and every spent output
//!   (an *input*) carries its own Ed25519 signature from the address that
//!   owns it. Each address signs a view of the request that contains only
//!   its own inputs, so signers never have to agree on each other's bytes.
//!
//! The authenticator answers one question: *which identities produced a
//! valid signature?* Whether those identities are allowed to do what the
//! request asks (roles, thresholds) is decided by the ledger afterwards.
//!
//! ## Modules
//!
//! - **config**: Wire constants and the runtime [`config::AuthConfig`].
//! - **crypto**: Ed25519 keypairs and the verifier trait.
//! - **identity**: Addresses, DIDs, verkeys and the key registry.
//! - **transaction**: Request types, the signing serializer, client helpers.
//! - **auth**: The default authenticator, the transfer authenticator and
//!   the dispatcher that picks between them.
//!
//! ## Example
//!
//! ```
//! use token_authn::auth::TokenAuthenticator;
//! use token_authn::config::AuthConfig;
//! use token_authn::crypto::SigningKeypair;
//! use token_authn::identity::MemoryKeyRegistry;
//! use token_authn::transaction::{sign_transfer_inputs, RequestBuilder};
//!
//! let alice = SigningKeypair::generate();
//! let bob = SigningKeypair::generate();
//!
//! let mut request = RequestBuilder::transfer()
//!     .req_id(1)
//!     .input(&alice.address(), 3)
//!     .output(&bob.address(), 10)
//!     .build();
//!
//! let config = AuthConfig::default();
//! sign_transfer_inputs(&mut request, &[alice.clone()], &config).unwrap();
//!
//! let authn = TokenAuthenticator::new(MemoryKeyRegistry::new(), config);
//! let signers = authn.authenticate(&request).unwrap();
//! assert!(signers.contains(&alice.address()));
//! ```

pub mod auth;
pub mod config;
pub mod crypto;
pub mod identity;
pub mod transaction;
