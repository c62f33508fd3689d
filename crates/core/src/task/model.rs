//! Task model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single user-entered item with completion state
///
/// Serialized with camelCase field names; `updatedAt` is optional so
/// records written without it still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new task with trimmed text
    ///
    /// Returns `None` when the text is empty after trimming.
    pub fn new(text: &str) -> Option<Self> {
        let text = normalize_text(text)?;
        let now = Utc::now();
        Some(Self {
            id: Uuid::new_v4(),
            text,
            completed: false,
            created_at: now,
            updated_at: Some(now),
        })
    }

    /// Set the completion state
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    /// Case-insensitive substring match on the text
    pub fn matches(&self, term: &str) -> bool {
        term.is_empty() || self.text.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Trim user input, rejecting empty or whitespace-only text
pub fn normalize_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
