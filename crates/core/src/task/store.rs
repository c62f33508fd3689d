//! Task store
//!
//! Owns the authoritative in-memory task list. Every mutation that changes
//! the list is followed by a full write through [`TaskPersistence`].

use tracing::{debug, info};
use uuid::Uuid;

use super::model::{normalize_text, Task};
use super::persistence::TaskPersistence;
use super::view::{self, Filter, TaskCounts};
use crate::storage::KeyValueStore;

/// In-memory task list backed by a key-value store
pub struct TaskStore<S> {
    /// Newest first
    tasks: Vec<Task>,
    persistence: TaskPersistence<S>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Open the store, loading whatever the storage holds
    pub fn open(storage: S) -> Self {
        Self::with_persistence(TaskPersistence::new(storage))
    }

    pub fn with_persistence(persistence: TaskPersistence<S>) -> Self {
        let tasks = persistence.load();
        info!("Opened task store with {} tasks", tasks.len());
        Self { tasks, persistence }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn counts(&self) -> TaskCounts {
        view::counts(&self.tasks)
    }

    pub fn filtered(&self, search_term: &str, filter: Filter) -> Vec<&Task> {
        view::filtered_tasks(&self.tasks, search_term, filter)
    }

    /// Add a task at the front of the list
    ///
    /// Blank text is ignored and returns `None`.
    pub fn add(&mut self, text: &str) -> Option<&Task> {
        let task = Task::new(text)?;
        debug!("Adding task {}", task.id);
        self.tasks.insert(0, task);
        self.persist();
        self.tasks.first()
    }

    /// Flip the completion state; returns `false` for an unknown id
    pub fn toggle(&mut self, id: Uuid) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.completed = !task.completed;
        task.touch();
        debug!("Toggled task {} to completed={}", id, task.completed);
        self.persist();
        true
    }

    /// Remove a task; returns `false` for an unknown id
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return false;
        }
        debug!("Removed task {}", id);
        self.persist();
        true
    }

    /// Replace the text of a task
    ///
    /// Returns `false` when the id is unknown, the text is blank, or the
    /// trimmed text equals the current text.
    pub fn update(&mut self, id: Uuid, text: &str) -> bool {
        let Some(text) = normalize_text(text) else {
            return false;
        };
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if task.text == text {
            return false;
        }
        task.text = text;
        task.touch();
        debug!("Updated text of task {}", id);
        self.persist();
        true
    }

    /// Remove every completed task, returning how many were removed
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        if removed > 0 {
            debug!("Cleared {} completed tasks", removed);
            self.persist();
        }
        removed
    }

    fn persist(&self) {
        // Failures are logged by the adapter; memory stays authoritative
        self.persistence.save(&self.tasks);
    }
}
