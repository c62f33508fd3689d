//! Core library for the local task list manager
//!
//! This crate contains the state-management logic, including:
//! - Task store and its persistence round-trip
//! - Derived views (filtering, search, counts)
//! - Key-value storage backends
//! - Theme preference and application state

pub mod app;
pub mod error;
pub mod storage;
pub mod task;
pub mod theme;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
