//! Derived views over the task list
//!
//! Pure functions, recomputed on every read.

use std::fmt;
use std::str::FromStr;

use super::model::Task;
use crate::Error;

/// View predicate over completion state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    pub fn accepts(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(Error::InvalidInput(format!("Unknown filter: {}", other))),
        }
    }
}

/// Aggregate counts over the full, unfiltered list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl TaskCounts {
    /// Count shown next to a filter tab
    pub fn for_filter(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.total,
            Filter::Active => self.active,
            Filter::Completed => self.completed,
        }
    }
}

/// Tasks matching both the search term and the filter, in list order
pub fn filtered_tasks<'a>(tasks: &'a [Task], search_term: &str, filter: Filter) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| filter.accepts(t) && t.matches(search_term))
        .collect()
}

pub fn counts(tasks: &[Task]) -> TaskCounts {
    let completed = tasks.iter().filter(|t| t.completed).count();
    TaskCounts {
        total: tasks.len(),
        active: tasks.len() - completed,
        completed,
    }
}

/// Message shown when the filtered list is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoMatches,
    NoCompleted,
    NoActive,
    NoTasks,
}

impl EmptyState {
    /// Pick the message for an empty view; a search term takes precedence
    pub fn for_view(search_term: &str, filter: Filter) -> Self {
        if !search_term.is_empty() {
            return Self::NoMatches;
        }
        match filter {
            Filter::Completed => Self::NoCompleted,
            Filter::Active => Self::NoActive,
            Filter::All => Self::NoTasks,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::NoMatches => "No matching tasks",
            Self::NoCompleted => "No completed tasks",
            Self::NoActive => "No active tasks",
            Self::NoTasks => "No tasks yet",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::NoMatches => "Try a different search term",
            Self::NoCompleted | Self::NoActive => "Switch to \"All\" to see other tasks",
            Self::NoTasks => "Add your first task above to get started!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.text.clone()).collect()
    }

    fn sample() -> Vec<Task> {
        vec![
            Task::new("Walk dog").unwrap().with_completed(true),
            Task::new("Buy milk").unwrap(),
            Task::new("Buy MILK powder").unwrap().with_completed(true),
        ]
    }

    #[test]
    fn test_filter_by_state() {
        let tasks = sample();

        assert_eq!(filtered_tasks(&tasks, "", Filter::All).len(), 3);
        assert_eq!(texts(&filtered_tasks(&tasks, "", Filter::Active)), ["Buy milk"]);
        assert_eq!(
            texts(&filtered_tasks(&tasks, "", Filter::Completed)),
            ["Walk dog", "Buy MILK powder"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_and_ordered() {
        let tasks = sample();

        assert_eq!(
            texts(&filtered_tasks(&tasks, "Milk", Filter::All)),
            ["Buy milk", "Buy MILK powder"]
        );
        assert_eq!(
            texts(&filtered_tasks(&tasks, "milk", Filter::Completed)),
            ["Buy MILK powder"]
        );
        assert!(filtered_tasks(&tasks, "cat", Filter::All).is_empty());
    }

    #[test]
    fn test_counts_ignore_filter_and_search() {
        let tasks = sample();
        let c = counts(&tasks);

        assert_eq!(
            c,
            TaskCounts {
                total: 3,
                active: 1,
                completed: 2
            }
        );
        assert_eq!(c.for_filter(Filter::All), 3);
        assert_eq!(c.for_filter(Filter::Active), 1);
        assert_eq!(c.for_filter(Filter::Completed), 2);
        assert_eq!(counts(&[]), TaskCounts::default());
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("active".parse::<Filter>().unwrap(), Filter::Active);
        assert_eq!(" Completed ".parse::<Filter>().unwrap(), Filter::Completed);
        assert_eq!(Filter::All.to_string(), "all");
        assert!(matches!("done".parse::<Filter>(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_empty_state() {
        assert_eq!(EmptyState::for_view("x", Filter::Active), EmptyState::NoMatches);
        assert_eq!(EmptyState::for_view("", Filter::Completed), EmptyState::NoCompleted);
        assert_eq!(EmptyState::for_view("", Filter::Active), EmptyState::NoActive);
        assert_eq!(EmptyState::for_view("", Filter::All), EmptyState::NoTasks);
        assert_eq!(EmptyState::NoTasks.title(), "No tasks yet");
    }
}
