//! Task module
//!
//! Task model, the authoritative store, its persistence, and derived views.

mod model;
mod persistence;
mod store;
mod view;

pub use model::{normalize_text, Task};
pub use persistence::{decode_tasks, TaskPersistence, TASKS_KEY};
pub use store::TaskStore;
pub use view::{counts, filtered_tasks, EmptyState, Filter, TaskCounts};
