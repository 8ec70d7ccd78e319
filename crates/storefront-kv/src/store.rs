//! The key-value store port.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{StoreError, StoreResult};

/// Asynchronous string-keyed persistence facility.
///
/// Values are opaque strings; callers own their encoding. Implementations
/// treat `get` and `set` as individually atomic and make no promise about
/// ordering between concurrent writers: the last `set` to complete wins.
///
/// # Example
///
/// ```rust,ignore
/// let store = MemoryStore::new();
/// store.set("Cart", "[]").await?;
/// assert_eq!(store.get("Cart").await?.as_deref(), Some("[]"));
/// ```
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the raw value stored under `key`.
    ///
    /// Returns `None` if the key has never been written.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete the value under `key`. Deleting a missing key succeeds.
    async fn remove(&self, key: &str) -> StoreResult<()>;

    /// Check if a key has a value.
    async fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key).await?.is_some())
    }
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key).await
    }

    async fn contains(&self, key: &str) -> StoreResult<bool> {
        (**self).contains(key).await
    }
}

/// Reject keys no backend can address.
pub(crate) fn validate_key(key: &str) -> StoreResult<()> {
    if key.is_empty() || key.chars().any(|c| c.is_control()) {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}
