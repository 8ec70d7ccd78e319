//! Cart persistence on top of a key-value store.

use std::sync::Arc;

use storefront_kv::KeyValueStore;

use crate::cart::{Cart, CartEntry};
use crate::error::CartError;

/// Fixed key the cart record lives under.
pub const CART_KEY: &str = "Cart";

/// Loads and saves the cart as a JSON array under a single key.
///
/// [`load`](Self::load) and [`save`](Self::save) never fail: read problems
/// degrade to an empty cart and write problems are logged and dropped. The
/// `try_*` variants expose the underlying errors.
pub struct CartRepository<S: ?Sized> {
    store: Arc<S>,
    key: String,
}

impl<S: ?Sized> Clone for CartRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key.clone(),
        }
    }
}

impl<S: KeyValueStore + ?Sized> CartRepository<S> {
    /// Create a repository over `store`, using [`CART_KEY`].
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            key: CART_KEY.to_string(),
        }
    }

    /// Use a different key for the cart record.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// The key the cart is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Load the persisted cart.
    ///
    /// A missing record is created as an empty cart. Read failures and
    /// malformed records yield an empty cart without touching the store.
    pub async fn load(&self) -> Cart {
        match self.try_load().await {
            Ok(Some(cart)) => {
                tracing::debug!(key = %self.key, entries = cart.len(), "loaded cart");
                cart
            }
            Ok(None) => {
                tracing::debug!(key = %self.key, "no persisted cart, starting empty");
                let cart = Cart::new();
                self.save(&cart).await;
                cart
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "cart read failed, using empty cart");
                Cart::new()
            }
        }
    }

    /// Save the cart, logging and dropping any failure.
    pub async fn save(&self, cart: &Cart) {
        match self.try_save(cart).await {
            Ok(()) => tracing::debug!(key = %self.key, entries = cart.len(), "saved cart"),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "cart write failed, keeping in-memory cart")
            }
        }
    }

    /// Load the persisted cart, reporting store and decode errors.
    ///
    /// Returns `Ok(None)` when the key has never been written.
    pub async fn try_load(&self) -> Result<Option<Cart>, CartError> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(None);
        };
        decode(&raw).map(Some)
    }

    /// Save the cart, reporting errors.
    pub async fn try_save(&self, cart: &Cart) -> Result<(), CartError> {
        let raw = serde_json::to_string(cart)?;
        self.store.set(&self.key, &raw).await?;
        Ok(())
    }
}

/// Decode a persisted record.
///
/// The record must be a JSON array of complete entries; anything else is
/// malformed. Duplicate ids keep their first occurrence.
fn decode(raw: &str) -> Result<Cart, CartError> {
    let entries: Vec<CartEntry> =
        serde_json::from_str(raw).map_err(|e| CartError::Malformed(e.to_string()))?;
    Ok(Cart::from_entries(entries))
}
