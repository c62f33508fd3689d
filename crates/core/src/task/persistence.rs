//! Task list persistence
//!
//! Reads and writes the whole task collection as JSON under one key.

use std::collections::HashSet;

use tracing::{debug, error, warn};

use super::model::{normalize_text, Task};
use crate::storage::KeyValueStore;
use crate::{Error, Result};

/// Storage key holding the serialized task list
pub const TASKS_KEY: &str = "todos-2do-app";

/// Persistence adapter for the task list
pub struct TaskPersistence<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> TaskPersistence<S> {
    /// Create an adapter writing under [`TASKS_KEY`]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, TASKS_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the stored task list
    ///
    /// A missing, unreadable, or malformed value loads as an empty list.
    pub fn load(&self) -> Vec<Task> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                error!("Failed to read tasks from storage: {}", e);
                return Vec::new();
            }
        };

        match decode_tasks(&raw) {
            Ok(tasks) => {
                debug!("Loaded {} tasks", tasks.len());
                tasks
            }
            Err(e) => {
                warn!("Discarding malformed stored tasks: {}", e);
                Vec::new()
            }
        }
    }

    /// Write the full task list, replacing the previous value
    ///
    /// Failures are logged and reported as `false`; the caller's in-memory
    /// list stays authoritative.
    pub fn save(&self, tasks: &[Task]) -> bool {
        match self.try_save(tasks) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to save tasks to storage: {}", e);
                false
            }
        }
    }

    fn try_save(&self, tasks: &[Task]) -> Result<()> {
        let content = serde_json::to_string(tasks)?;
        self.storage.set(&self.key, &content)?;
        debug!("Saved {} tasks", tasks.len());
        Ok(())
    }
}

/// Parse and validate a stored task list
///
/// Text is trimmed; records left blank are dropped. Duplicate ids reject
/// the whole list.
pub fn decode_tasks(raw: &str) -> Result<Vec<Task>> {
    let stored: Vec<Task> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(stored.len());
    let mut tasks = Vec::with_capacity(stored.len());
    for mut task in stored {
        if !seen.insert(task.id) {
            return Err(Error::InvalidInput(format!("Duplicate task ID {}", task.id)));
        }
        match normalize_text(&task.text) {
            Some(text) => {
                task.text = text;
                tasks.push(task);
            }
            None => warn!("Dropping stored task {} with blank text", task.id),
        }
    }

    Ok(tasks)
}
