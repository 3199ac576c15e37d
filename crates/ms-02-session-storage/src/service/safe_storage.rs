use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use session_telemetry::{metric_inc, STORAGE_FAILURES};
use tracing::warn;

use crate::domain::errors::StorageError;
use crate::domain::keys::StorageKey;
use crate::ports::outbound::KeyValueStore;

/// Best-effort boundary over a [`KeyValueStore`].
///
/// A failed read is reported as absent and a failed write is dropped; both
/// are logged at `warn` and counted in `ms_storage_failures_total`.
#[derive(Clone)]
pub struct SafeStorage {
    store: Arc<dyn KeyValueStore>,
}

impl SafeStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn get_item(&self, key: StorageKey) -> Option<String> {
        self.store
            .get(key.as_str())
            .unwrap_or_else(|e| absorb("get", key, e))
    }

    pub fn set_item(&self, key: StorageKey, value: &str) {
        if let Err(e) = self.store.set(key.as_str(), value) {
            absorb::<()>("set", key, e);
        }
    }

    pub fn remove_item(&self, key: StorageKey) {
        if let Err(e) = self.store.remove(key.as_str()) {
            absorb::<()>("remove", key, e);
        }
    }

    /// Read and decode a JSON value. Undecodable values count as absent.
    pub fn get_json<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        let raw = self.get_item(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => absorb("decode", key, e.into()),
        }
    }

    pub fn set_json<T: Serialize>(&self, key: StorageKey, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.set_item(key, &raw),
            Err(e) => absorb::<()>("encode", key, e.into()),
        }
    }
}

fn absorb<T: Default>(operation: &'static str, key: StorageKey, error: StorageError) -> T {
    warn!(
        operation,
        key = %key,
        kind = error.kind(),
        error = %error,
        "Storage operation failed, continuing without it"
    );
    metric_inc!(STORAGE_FAILURES, &[operation]);
    T::default()
}
