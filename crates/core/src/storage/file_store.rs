//! File-based key-value storage
//!
//! Stores each key as a JSON text file in a directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::kv::{check_quota, validate_key, KeyValueStore, DEFAULT_QUOTA_BYTES};
use crate::{Error, Result};

/// Directory-backed key-value store
///
/// The directory is created on first write.
pub struct FileStore {
    /// Directory holding one file per key
    base_dir: PathBuf,
    /// Maximum size of a single value in bytes
    quota: Option<usize>,
}

impl FileStore {
    /// Create a new FileStore rooted at `base_dir` with the default quota
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            quota: Some(DEFAULT_QUOTA_BYTES),
        }
    }

    /// Set the per-value quota; `None` disables it
    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota = quota;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!(".{}.json.tmp", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        match fs::read_to_string(self.key_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        check_quota(key, value, self.quota)?;

        fs::create_dir_all(&self.base_dir)?;

        // Rename over the old file so a failed write never truncates it
        let temp = self.temp_path(key);
        if let Err(e) = fs::write(&temp, value) {
            let _ = fs::remove_file(&temp);
            return Err(Error::Io(e));
        }
        let path = self.key_path(key);
        fs::rename(&temp, &path).map_err(|e| {
            let _ = fs::remove_file(&temp);
            Error::Storage(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("data"));
        (store, temp_dir)
    }

    #[test]
    fn test_get_missing_key() {
        let (store, _temp) = create_test_store();
        assert_eq!(store.get("todos").unwrap(), None);
    }

    #[test]
    fn test_set_creates_directory_and_file() {
        let (store, _temp) = create_test_store();
        assert!(!store.base_dir().exists());

        store.set("todos", "[]").unwrap();

        assert!(store.base_dir().join("todos.json").exists());
        assert_eq!(store.get("todos").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let (store, _temp) = create_test_store();
        store.set("theme", "light").unwrap();
        store.set("theme", "dark").unwrap();

        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        // No temp file left behind
        let entries: Vec<_> = fs::read_dir(store.base_dir()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_quota_rejection_keeps_prior_value() {
        let (store, _temp) = create_test_store();
        let store = store.with_quota(Some(8));
        store.set("todos", "[]").unwrap();

        let result = store.set("todos", "[\"far too long\"]");
        match result {
            Err(Error::QuotaExceeded { limit, .. }) => assert_eq!(limit, 8),
            other => panic!("Expected QuotaExceeded error, got: {:?}", other),
        }
        assert_eq!(store.get("todos").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_remove() {
        let (store, _temp) = create_test_store();
        store.set("todos", "[]").unwrap();

        store.remove("todos").unwrap();
        assert_eq!(store.get("todos").unwrap(), None);

        // Removing again is fine
        store.remove("todos").unwrap();
    }

    #[test]
    fn test_invalid_key() {
        let (store, _temp) = create_test_store();
        assert!(matches!(store.set("../x", "1"), Err(Error::InvalidKey(_))));
        assert!(matches!(store.get(""), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn test_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("data");

        FileStore::new(&dir).set("theme", "dark").unwrap();

        let reopened = FileStore::new(&dir);
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
    }
}
