//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Quota exceeded for key '{key}': {size} bytes > {limit} bytes")]
    QuotaExceeded { key: String, size: usize, limit: usize },

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
