//! Key-value persistence.
//!
//! Client state (the cart, cached listings, navigation markers) lives in a
//! string-to-string store. The [`KeyValueStore`] trait is the only seam
//! between the core and whatever backend holds that state: [`MemoryStore`]
//! here, a JSON file in the CLI.

mod cache;
mod navigation;

pub use cache::{CacheEnvelope, TimedCache};
pub use navigation::{ReturnPoint, ReturnSource};

use std::collections::BTreeMap;

use thiserror::Error;

/// Well-known store keys.
pub mod keys {
    /// Persisted cart entries (JSON array).
    pub const CART: &str = "cart";
    /// Timed cache of the works listing.
    pub const WORKS_CACHE: &str = "worksCache";
    /// Timed cache of the services listing.
    pub const SERVICES_CACHE: &str = "servicesCache";
    /// Page the visitor left to open a detail view.
    pub const RETURN_TO_SOURCE: &str = "returnToSource";
    /// Work card to scroll back to.
    pub const RETURN_TO_WORK_ID: &str = "returnToWorkId";
    /// Product card to scroll back to.
    pub const RETURN_TO_PRODUCT_ID: &str = "returnToProductId";
    /// Service selected when the visitor left.
    pub const RETURN_TO_SERVICE_KEY: &str = "returnToServiceKey";
    /// Service tag selected when the visitor left.
    pub const RETURN_TO_SERVICE_TAG: &str = "returnToServiceTag";
    /// When the return point was recorded (milliseconds since the epoch).
    pub const RETURN_TO_TIME: &str = "returnToTime";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded.
    #[error("Storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Backend-specific failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// A string key-value store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory store. Contents are lost when dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
