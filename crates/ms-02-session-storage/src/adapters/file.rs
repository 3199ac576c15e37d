//! # JSON File Store
//!
//! Persists the whole key space as one JSON object. Every write takes an
//! exclusive `fs2` lock on a sidecar `<file>.lock`, reloads the file, applies
//! the change and replaces the file through a temporary sibling, so two
//! processes sharing a file never lose each other's keys.
//!
//! A file that is not a JSON object of strings is moved aside to
//! `<file>.corrupt` on open and the store starts empty.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use parking_lot::RwLock;
use session_telemetry::{metric_inc, STORAGE_FAILURES};
use tracing::{debug, info, warn};

use crate::domain::errors::StorageError;
use crate::ports::outbound::KeyValueStore;

type Entries = BTreeMap<String, String>;

pub struct JsonFileStore {
    path: PathBuf,
    lock_path: PathBuf,
    cache: RwLock<Entries>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// # Errors
    ///
    /// `StorageError::Io` if the file exists but cannot be read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let mut lock_name = path.as_os_str().to_owned();
        lock_name.push(".lock");

        let entries = match Self::load(&path) {
            Err(StorageError::Serialization(error)) => Self::set_aside(&path, &error),
            loaded => loaded?,
        };
        if entries.is_empty() {
            info!(path = %path.display(), "No existing session storage file");
        } else {
            info!(path = %path.display(), keys = entries.len(), "Loaded session storage");
        }

        Ok(Self {
            path,
            lock_path: PathBuf::from(lock_name),
            cache: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<Entries, StorageError> {
        match fs::read_to_string(path) {
            Ok(text) if text.trim().is_empty() => Ok(Entries::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn set_aside(path: &Path, error: &serde_json::Error) -> Entries {
        let mut aside = path.as_os_str().to_owned();
        aside.push(".corrupt");
        let aside = PathBuf::from(aside);

        warn!(
            path = %path.display(),
            aside = %aside.display(),
            error = %error,
            "Session storage file is corrupt, starting empty"
        );
        metric_inc!(STORAGE_FAILURES, &["open"]);

        if let Err(e) = fs::rename(path, &aside) {
            warn!(path = %path.display(), error = %e, "Failed to move corrupt session storage aside");
        }
        Entries::new()
    }

    fn acquire_lock(&self) -> Result<File, StorageError> {
        if let Some(parent) = self.lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)?;
        file.try_lock_exclusive().map_err(|_| StorageError::Lock {
            path: self.lock_path.display().to_string(),
        })?;
        Ok(file)
    }

    /// Read-modify-write under the file lock.
    fn mutate<F>(&self, apply: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Entries),
    {
        let lock = self.acquire_lock()?;
        let result = self.mutate_locked(apply);
        // Closing the handle releases the lock even if this fails.
        let _ = FileExt::unlock(&lock);
        result
    }

    fn mutate_locked<F>(&self, apply: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Entries),
    {
        let mut entries = Self::load(&self.path)?;
        apply(&mut entries);

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(serde_json::to_string_pretty(&entries)?.as_bytes())?;
        tmp.sync_all()?;
        fs::rename(&tmp_path, &self.path)?;

        debug!(path = %self.path.display(), keys = entries.len(), "Session storage written");
        *self.cache.write() = entries;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.cache.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.mutate(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.set("@appkit/wallet_id", "walletConnect").unwrap();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("@appkit/wallet_id").unwrap().as_deref(),
            Some("walletConnect")
        );
        assert_eq!(reopened.get("k").unwrap(), None);
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("absent.json")).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_set_aside() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("@appkit/wallet_id").unwrap(), None);
        assert_eq!(
            fs::read_to_string(dir.path().join("session.json.corrupt")).unwrap(),
            "{not json"
        );

        store.set("@appkit/wallet_id", "walletConnect").unwrap();
        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("@appkit/wallet_id").unwrap().as_deref(),
            Some("walletConnect")
        );
    }

    #[test]
    fn test_two_handles_keep_each_others_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let first = JsonFileStore::open(&path).unwrap();
        let second = JsonFileStore::open(&path).unwrap();
        first.set("a", "1").unwrap();
        second.set("b", "2").unwrap();

        let merged = JsonFileStore::open(&path).unwrap();
        assert_eq!(merged.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(merged.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_held_lock_is_reported() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("session.json")).unwrap();

        let held = store.acquire_lock().unwrap();
        assert!(matches!(
            store.set("a", "1"),
            Err(StorageError::Lock { .. })
        ));
        drop(held);

        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }
}
