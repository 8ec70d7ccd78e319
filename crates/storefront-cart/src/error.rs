//! Cart error types.

use thiserror::Error;

/// Errors that can occur in cart and catalog operations.
///
/// The repository's public `load`/`save` absorb these; they surface only
/// through the `try_*` variants and catalog loading.
#[derive(Error, Debug)]
pub enum CartError {
    /// The underlying store failed.
    #[error("Store error: {0}")]
    Store(#[from] storefront_kv::StoreError),

    /// Persisted data is not a valid cart record.
    #[error("Malformed cart record: {0}")]
    Malformed(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Catalog contains two items with the same id.
    #[error("Duplicate catalog item id: {0}")]
    DuplicateItem(crate::ItemId),

    /// Catalog file could not be read or parsed.
    #[error("Catalog error: {0}")]
    Catalog(String),
}

impl From<serde_json::Error> for CartError {
    fn from(e: serde_json::Error) -> Self {
        CartError::SerializationError(e.to_string())
    }
}
