//! # Identity Module
//!
//! Who owns a key, and how to find it.
//!
//! 1. **Address**: a base58 Ed25519 verkey. Self-certifying: the text is
//!    the key. Used by transfer inputs.
//! 2. **DID**: base58 of the first 16 verkey bytes. Not a key by itself;
//!    the registry maps it to a full or abbreviated verkey.
//! 3. **Registry**: the host's read-only `identifier -> verkey` lookup.

pub mod address;
pub mod registry;

pub use address::{is_self_certifying, resolve_address_verkey};
pub use registry::{KeyRegistry, MemoryKeyRegistry};
