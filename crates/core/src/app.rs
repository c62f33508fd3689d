//! Application state
//!
//! Everything the presentation layer reads or mutates: the task store, the
//! active filter and search term, the theme, and an in-progress edit.

use tracing::debug;
use uuid::Uuid;

use crate::storage::KeyValueStore;
use crate::task::{EmptyState, Filter, Task, TaskCounts, TaskStore};
use crate::theme::{Theme, ThemePreference};

/// Text being edited for one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: Uuid,
    pub text: String,
}

/// Outcome of committing an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// No edit in progress
    NotEditing,
    /// Text was blank; the session stays open
    Rejected,
    /// Session closed without changing the task
    Unchanged,
    /// Session closed and the task text replaced
    Saved,
}

/// Read model handed to the presentation layer
#[derive(Debug)]
pub struct AppView<'a> {
    pub tasks: Vec<&'a Task>,
    pub counts: TaskCounts,
    pub filter: Filter,
    pub search_term: &'a str,
    pub theme: Theme,
    pub editing: Option<&'a EditSession>,
    /// Set when `tasks` is empty
    pub empty_state: Option<EmptyState>,
    pub show_filters: bool,
    pub show_clear_completed: bool,
}

pub struct AppState<S> {
    store: TaskStore<S>,
    theme: ThemePreference<S>,
    filter: Filter,
    search_term: String,
    editing: Option<EditSession>,
}

impl<S: KeyValueStore + Clone> AppState<S> {
    /// Load tasks and theme from `storage`
    pub fn load(storage: S, default_theme: Theme) -> Self {
        Self {
            store: TaskStore::open(storage.clone()),
            theme: ThemePreference::load(storage, default_theme),
            filter: Filter::default(),
            search_term: String::new(),
            editing: None,
        }
    }
}

impl<S: KeyValueStore> AppState<S> {
    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn view(&self) -> AppView<'_> {
        let tasks = self.store.filtered(&self.search_term, self.filter);
        let counts = self.store.counts();
        let empty_state = tasks
            .is_empty()
            .then(|| EmptyState::for_view(&self.search_term, self.filter));
        AppView {
            tasks,
            counts,
            filter: self.filter,
            search_term: &self.search_term,
            theme: self.theme.current(),
            editing: self.editing.as_ref(),
            empty_state,
            show_filters: counts.total > 0,
            show_clear_completed: counts.completed > 0,
        }
    }

    pub fn add(&mut self, text: &str) -> bool {
        self.store.add(text).is_some()
    }

    pub fn toggle(&mut self, id: Uuid) -> bool {
        self.store.toggle(id)
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let removed = self.store.remove(id);
        if removed {
            self.close_edit_if_gone();
        }
        removed
    }

    pub fn update(&mut self, id: Uuid, text: &str) -> bool {
        self.store.update(id, text)
    }

    pub fn clear_completed(&mut self) -> usize {
        let removed = self.store.clear_completed();
        if removed > 0 {
            self.close_edit_if_gone();
        }
        removed
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle()
    }

    /// Begin editing a task; completed and unknown tasks cannot be edited
    pub fn start_edit(&mut self, id: Uuid) -> bool {
        match self.store.get(id) {
            Some(task) if !task.completed => {
                self.editing = Some(EditSession {
                    id,
                    text: task.text.clone(),
                });
                true
            }
            _ => false,
        }
    }

    pub fn set_edit_text(&mut self, text: impl Into<String>) {
        if let Some(session) = self.editing.as_mut() {
            session.text = text.into();
        }
    }

    pub fn commit_edit(&mut self) -> EditOutcome {
        let Some(session) = self.editing.as_ref() else {
            return EditOutcome::NotEditing;
        };
        if session.text.trim().is_empty() {
            return EditOutcome::Rejected;
        }
        let (id, text) = (session.id, session.text.clone());
        self.editing = None;
        if self.store.update(id, &text) {
            EditOutcome::Saved
        } else {
            EditOutcome::Unchanged
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    fn close_edit_if_gone(&mut self) {
        if let Some(session) = &self.editing {
            if self.store.get(session.id).is_none() {
                debug!("Closing edit session for removed task {}", session.id);
                self.editing = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn create_app() -> AppState<Arc<MemoryStore>> {
        AppState::load(Arc::new(MemoryStore::new()), Theme::Light)
    }

    fn first_id(app: &AppState<Arc<MemoryStore>>) -> Uuid {
        app.store().tasks()[0].id
    }

    #[test]
    fn test_empty_view() {
        let app = create_app();
        let view = app.view();

        assert!(view.tasks.is_empty());
        assert_eq!(view.empty_state, Some(EmptyState::NoTasks));
        assert!(!view.show_filters);
        assert!(!view.show_clear_completed);
        assert_eq!(view.theme, Theme::Light);
    }

    #[test]
    fn test_view_flags() {
        let mut app = create_app();
        app.add("Buy milk");
        let id = first_id(&app);

        let view = app.view();
        assert!(view.show_filters);
        assert!(!view.show_clear_completed);
        assert!(view.empty_state.is_none());

        app.toggle(id);
        app.set_filter(Filter::Active);
        let view = app.view();
        assert!(view.show_clear_completed);
        assert_eq!(view.empty_state, Some(EmptyState::NoActive));
    }

    #[test]
    fn test_search_empty_state() {
        let mut app = create_app();
        app.add("Buy milk");
        app.set_search_term("bread");

        assert_eq!(app.view().empty_state, Some(EmptyState::NoMatches));
        assert_eq!(app.view().search_term, "bread");
    }

    #[test]
    fn test_edit_flow() {
        let mut app = create_app();
        app.add("Buy milk");
        let id = first_id(&app);

        assert!(app.start_edit(id));
        assert_eq!(app.editing().unwrap().text, "Buy milk");

        app.set_edit_text("  Buy oat milk ");
        assert_eq!(app.commit_edit(), EditOutcome::Saved);
        assert!(app.editing().is_none());
        assert_eq!(app.store().get(id).unwrap().text, "Buy oat milk");
    }

    #[test]
    fn test_commit_blank_keeps_session() {
        let mut app = create_app();
        app.add("Buy milk");
        let id = first_id(&app);

        app.start_edit(id);
        app.set_edit_text("   ");
        assert_eq!(app.commit_edit(), EditOutcome::Rejected);
        assert!(app.editing().is_some());
        assert_eq!(app.store().get(id).unwrap().text, "Buy milk");

        app.cancel_edit();
        assert!(app.editing().is_none());
        assert_eq!(app.commit_edit(), EditOutcome::NotEditing);
    }

    #[test]
    fn test_commit_unchanged_closes_session() {
        let mut app = create_app();
        app.add("Buy milk");
        let id = first_id(&app);

        app.start_edit(id);
        assert_eq!(app.commit_edit(), EditOutcome::Unchanged);
        assert!(app.editing().is_none());
    }

    #[test]
    fn test_completed_task_not_editable() {
        let mut app = create_app();
        app.add("Buy milk");
        let id = first_id(&app);
        app.toggle(id);

        assert!(!app.start_edit(id));
        assert!(!app.start_edit(Uuid::new_v4()));
        assert!(app.editing().is_none());
    }

    #[test]
    fn test_remove_closes_edit_session() {
        let mut app = create_app();
        app.add("Buy milk");
        app.add("Walk dog");
        let walk = first_id(&app);
        let milk = app.store().tasks()[1].id;

        app.start_edit(milk);
        app.remove(walk);
        assert!(app.editing().is_some());

        app.remove(milk);
        assert!(app.editing().is_none());
    }

    #[test]
    fn test_theme_shares_storage_with_tasks() {
        let storage = Arc::new(MemoryStore::new());
        let mut app = AppState::load(Arc::clone(&storage), Theme::Light);
        app.add("Buy milk");
        assert_eq!(app.toggle_theme(), Theme::Dark);

        let reloaded = AppState::load(Arc::clone(&storage), Theme::Light);
        assert_eq!(reloaded.theme(), Theme::Dark);
        assert_eq!(reloaded.store().tasks().len(), 1);
        // UI state is not persisted
        assert_eq!(reloaded.filter(), Filter::All);
        assert_eq!(reloaded.search_term(), "");
    }
}
