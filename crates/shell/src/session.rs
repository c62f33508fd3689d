//! Applies parsed commands to the application state

use todo_core::app::{AppState, EditOutcome};
use todo_core::storage::KeyValueStore;
use tracing::debug;
use uuid::Uuid;

use crate::command::{Command, USAGE};

/// What the loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Redraw, optionally with a status line
    Redraw(Option<String>),
    /// Print text without redrawing
    Print(String),
    Quit,
}

pub struct Session<S> {
    app: AppState<S>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(app: AppState<S>) -> Self {
        Self { app }
    }

    pub fn app(&self) -> &AppState<S> {
        &self.app
    }

    pub fn handle(&mut self, command: Command) -> Reply {
        debug!(?command, "Handling command");
        match command {
            Command::Add(text) => {
                if self.app.add(&text) {
                    Reply::Redraw(None)
                } else {
                    Reply::Redraw(Some("Nothing to add".to_string()))
                }
            }
            Command::Toggle(n) => match self.resolve(n) {
                Some(id) => {
                    self.app.toggle(id);
                    Reply::Redraw(None)
                }
                None => no_such_task(n),
            },
            Command::Remove(n) => match self.resolve(n) {
                Some(id) => {
                    self.app.remove(id);
                    Reply::Redraw(None)
                }
                None => no_such_task(n),
            },
            Command::Edit { index, text } => {
                let Some(id) = self.resolve(index) else {
                    return no_such_task(index);
                };
                if !self.app.start_edit(id) {
                    return status("Completed tasks cannot be edited");
                }
                match text {
                    Some(text) => self.commit(Some(text)),
                    None => status("Editing: `save <text>` to finish, `cancel` to abandon"),
                }
            }
            Command::Save(text) => self.commit(text),
            Command::Cancel => {
                self.app.cancel_edit();
                Reply::Redraw(None)
            }
            Command::Filter(filter) => {
                self.app.set_filter(filter);
                Reply::Redraw(None)
            }
            Command::Search(term) => {
                self.app.set_search_term(term);
                Reply::Redraw(None)
            }
            Command::ClearCompleted => {
                let removed = self.app.clear_completed();
                Reply::Redraw(Some(format!("Cleared {} completed tasks", removed)))
            }
            Command::Theme => {
                let theme = self.app.toggle_theme();
                Reply::Redraw(Some(format!("Switched to {} mode", theme)))
            }
            Command::List => Reply::Redraw(None),
            Command::Help => Reply::Print(USAGE.to_string()),
            Command::Quit => Reply::Quit,
        }
    }

    fn commit(&mut self, text: Option<String>) -> Reply {
        if let Some(text) = text {
            self.app.set_edit_text(text);
        }
        match self.app.commit_edit() {
            EditOutcome::NotEditing => status("Not editing a task"),
            EditOutcome::Rejected => status("Task text cannot be empty"),
            EditOutcome::Unchanged | EditOutcome::Saved => Reply::Redraw(None),
        }
    }

    /// Map a 1-based displayed position to a task id
    fn resolve(&self, n: usize) -> Option<Uuid> {
        let index = n.checked_sub(1)?;
        self.app.view().tasks.get(index).map(|t| t.id)
    }
}

fn status(message: &str) -> Reply {
    Reply::Redraw(Some(message.to_string()))
}

fn no_such_task(n: usize) -> Reply {
    Reply::Redraw(Some(format!("No task number {}", n)))
}
