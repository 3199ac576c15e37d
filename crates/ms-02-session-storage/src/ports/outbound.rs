//! # Outbound Ports (Driven Ports)
//!
//! The persistent key-value store behind the session helpers.
//!
//! Production: `JsonFileStore` (adapters/file.rs)
//! Testing: `InMemoryStore` (adapters/memory.rs), `FailingStore` (below)

use crate::domain::errors::StorageError;
use parking_lot::Mutex;

/// String-keyed persistent storage.
///
/// Implementations use interior mutability so a single store can be shared
/// behind an `Arc` by every component that persists session data.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite a value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Store whose every operation fails; records the keys it was asked about.
#[derive(Default)]
pub struct FailingStore {
    attempts: Mutex<Vec<String>>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys touched so far, in call order.
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().clone()
    }

    fn fail(&self, key: &str) -> StorageError {
        self.attempts.lock().push(key.to_string());
        StorageError::Unavailable {
            reason: "storage disabled".to_string(),
        }
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Err(self.fail(key))
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(self.fail(key))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Err(self.fail(key))
    }
}
