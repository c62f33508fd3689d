//! In-memory key-value storage

use std::collections::HashMap;
use std::sync::RwLock;

use super::kv::{check_quota, validate_key, KeyValueStore};
use crate::{Error, Result};

/// Key-value store that lives only as long as the process
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-value quota; `None` disables it
    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota = quota;
        self
    }

    /// Seed a raw value, bypassing validation and quota
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(entries) = self.entries.get_mut() {
            entries.insert(key.into(), value.into());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> Error {
    Error::Storage("memory store lock poisoned".to_string())
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        check_quota(key, value, self.quota)?;
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(store.len(), 1);

        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn test_quota() {
        let store = MemoryStore::new().with_quota(Some(4)).with_entry("k", "old");

        assert!(matches!(
            store.set("k", "too long"),
            Err(Error::QuotaExceeded { .. })
        ));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("old"));
    }
}
