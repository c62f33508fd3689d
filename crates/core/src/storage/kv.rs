//! Key-value store trait
//!
//! Defines the interface for the local string key-value store.

use std::sync::Arc;

use crate::{Error, Result};

/// Per-value size budget, matching the usual browser local-storage limit.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Synchronous string key-value store
///
/// Writes either fully replace the previous value or fail leaving it intact.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Reject keys that could escape a storage directory.
pub fn validate_key(key: &str) -> Result<()> {
    let bad = key.is_empty()
        || key == "."
        || key.contains("..")
        || key.contains(['/', '\\', '\0']);
    if bad {
        return Err(Error::InvalidKey(key.to_string()));
    }
    Ok(())
}

pub(crate) fn check_quota(key: &str, value: &str, quota: Option<usize>) -> Result<()> {
    match quota {
        Some(limit) if value.len() > limit => Err(Error::QuotaExceeded {
            key: key.to_string(),
            size: value.len(),
            limit,
        }),
        _ => Ok(()),
    }
}
