//! Error types for vehicle storage

use thiserror::Error;

/// Storage error type
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Table bootstrap error
    #[error("Schema error: {0}")]
    Schema(String),

    /// Underlying rusqlite error
    #[error("SQLite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
