//! # Transaction Module
//!
//! Request types and the bytes their signatures cover.
//!
//! ## Architecture
//!
//! ```text
//! types.rs         - Request, Operation, Input, Output, TransactionType
//! builder.rs       - Fluent RequestBuilder for unsigned requests
//! serialization.rs - Canonical signing bytes (whole request / per-signer view)
//! signing.rs       - Wallet-side helpers producing those signatures
//! ```
//!
//! ## Design Decisions
//!
//! - Transfer inputs are signed per owning address. An address signs a view
//!   of the request holding only its own inputs, stripped of signatures, and
//!   without the submitter `identifier`.
//! - Everything a signature covers is canonical JSON with sorted keys.
//! - Unknown fields survive parsing and are signed like known ones.

pub mod builder;
pub mod serialization;
pub mod signing;
pub mod types;

pub use builder::RequestBuilder;
pub use serialization::{canonical_view, serialize_for_signing};
pub use signing::{add_request_signature, sign_request, sign_transfer_inputs};
pub use types::{Input, Operation, Output, Request, TransactionType};
