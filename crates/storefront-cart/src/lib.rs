//! Persisted cart for a two-screen storefront.
//!
//! The catalog screen and the checkout screen never share memory. Each
//! owns a [`CartController`] that re-reads the cart from a
//! [`KeyValueStore`](storefront_kv::KeyValueStore) when the screen gains
//! focus and writes the whole cart back after every change.
//!
//! - **Catalog**: read-only items, [`StaticCatalog`]
//! - **Cart**: [`Cart`] (unique by id, insertion ordered), [`CartRepository`],
//!   [`CartController`]
//! - **Views**: [`CatalogView`], [`CartView`]
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_cart::prelude::*;
//! use storefront_kv::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::new());
//! let catalog: Arc<dyn CatalogSource> = Arc::new(StaticCatalog::demo());
//!
//! let mut home = CatalogView::new(
//!     catalog.clone(),
//!     CartController::new(CartRepository::new(store.clone())),
//! );
//! home.on_focus().await;
//! home.add_to_cart(ItemId::new(1)).await;
//!
//! let mut checkout = CartView::new(CartController::new(CartRepository::new(store)));
//! checkout.on_focus().await;
//! println!("{} {}", TOTAL_LABEL, checkout.total());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod views;

pub use error::CartError;
pub use ids::ItemId;
pub use money::Price;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CartError;
    pub use crate::ids::ItemId;
    pub use crate::money::Price;

    // Catalog
    pub use crate::catalog::{AssetRef, CatalogSource, Item, StaticCatalog};

    // Cart
    pub use crate::cart::{
        Cart, CartController, CartEntry, CartRepository, CartState, PersistMode, CART_KEY,
    };

    // Views
    pub use crate::views::{
        AddOutcome, CartView, CatalogView, CheckoutOutcome, Listing, RemoveOutcome, TOTAL_LABEL,
    };
}
