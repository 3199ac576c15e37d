//! # Domain Errors
//!
//! Failures of the underlying key-value store.
//!
//! These never reach coordinator callers: [`crate::SafeStorage`] logs them
//! and maps them to "absent" or "ignored".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value or the backing file could not be (de)serialized.
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Another process holds the storage lock.
    #[error("Storage lock unavailable: {path}")]
    Lock {
        /// Lock file that could not be acquired.
        path: String,
    },

    /// The store is not usable at all (quota exhausted, disabled, ...).
    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },
}

impl StorageError {
    /// Short label used in metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StorageError::Io(_) => "io",
            StorageError::Serialization(_) => "serialization",
            StorageError::Lock { .. } => "lock",
            StorageError::Unavailable { .. } => "unavailable",
        }
    }
}
