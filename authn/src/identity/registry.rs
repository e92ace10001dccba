//! Identity registry lookups.
//!
//! The ledger's identity system maps identifiers (DIDs) to the verkey
//! currently authorised for them. Authentication only ever *reads* it, so
//! the seam is a single method. [`MemoryKeyRegistry`] is the in-process
//! implementation used by the CLI and the tests; a ledger plugs in its own
//! state-backed registry instead.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;

/// Read-only verkey lookup owned by the host identity system.
pub trait KeyRegistry: Send + Sync {
    /// Returns the verkey text registered for `identifier`, if any.
    fn resolve_key(&self, identifier: &str) -> Option<String>;
}

impl<T: KeyRegistry + ?Sized> KeyRegistry for &T {
    fn resolve_key(&self, identifier: &str) -> Option<String> {
        (**self).resolve_key(identifier)
    }
}

impl<T: KeyRegistry + ?Sized> KeyRegistry for Arc<T> {
    fn resolve_key(&self, identifier: &str) -> Option<String> {
        (**self).resolve_key(identifier)
    }
}

/// Concurrent in-memory registry.
///
/// Backed by a sharded `DashMap`, so many authentication calls can read it
/// from different threads while a writer occasionally rotates a key.
#[derive(Debug, Default)]
pub struct MemoryKeyRegistry {
    keys: DashMap<String, String>,
}

impl MemoryKeyRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a `{"<identifier>": "<verkey>", ...}` snapshot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(entries.into_iter().collect())
    }

    /// Register (or rotate) the verkey for `identifier`.
    pub fn insert(&self, identifier: impl Into<String>, verkey: impl Into<String>) {
        self.keys.insert(identifier.into(), verkey.into());
    }

    /// Drop an identifier. Returns the verkey it had.
    pub fn remove(&self, identifier: &str) -> Option<String> {
        self.keys.remove(identifier).map(|(_, verkey)| verkey)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<(String, String)> for MemoryKeyRegistry {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl KeyRegistry for MemoryKeyRegistry {
    fn resolve_key(&self, identifier: &str) -> Option<String> {
        self.keys.get(identifier).map(|entry| entry.value().clone())
    }
}
