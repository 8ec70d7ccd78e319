//! Store error types.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when using a key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Key is empty or contains characters the backend cannot address.
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    /// Reading a value failed.
    #[error("Read failed for {key}: {reason}")]
    ReadError { key: String, reason: String },

    /// Writing a value failed.
    #[error("Write failed for {key}: {reason}")]
    WriteError { key: String, reason: String },

    /// Underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
