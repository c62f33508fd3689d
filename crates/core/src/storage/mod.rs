//! Storage module
//!
//! Synchronous local key-value storage used for persisted state.

mod file_store;
mod kv;
mod memory_store;

pub use file_store::FileStore;
pub use kv::{validate_key, KeyValueStore, DEFAULT_QUOTA_BYTES};
pub use memory_store::MemoryStore;
