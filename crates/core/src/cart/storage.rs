//! Durable key/value backends for the cart.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend failed to read or write.
    #[error("storage backend error: {0}")]
    Backend(String),
    /// The cart could not be encoded for writing.
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A string key/value store scoped to one visitor.
///
/// Mirrors browser local storage: one key holds the whole serialized cart.
pub trait CartStorage: Send + Sync {
    /// Read the value under `key`, or `None` if nothing is stored.
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Replace the value under `key`.
    fn write(
        &mut self,
        key: &str,
        value: String,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// In-process storage, shared between clones.
///
/// Two stores opened over clones of the same `MemoryStorage` see each
/// other's writes, which is how a page reload is simulated in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with `value` under `key`.
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        storage
    }

    /// Synchronous peek, for assertions.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl CartStorage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    async fn write(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value);
        Ok(())
    }
}
