//! Catalog screen model.

use std::sync::Arc;

use storefront_kv::KeyValueStore;

use crate::cart::{CartController, CartState};
use crate::catalog::{CatalogSource, Item};
use crate::ids::ItemId;

/// Result of tapping "add" on a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Item was appended to the cart.
    Added,
    /// Item was already in the cart; nothing changed.
    AlreadyInCart,
    /// No catalog item has that id.
    UnknownItem,
}

/// A catalog row with its cart membership.
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    /// The catalog item.
    pub item: &'a Item,
    /// Whether the cart holds an entry with the item's id.
    pub in_cart: bool,
}

/// The catalog screen: lists items and adds them to the cart.
pub struct CatalogView<S: ?Sized> {
    catalog: Arc<dyn CatalogSource>,
    controller: CartController<S>,
}

impl<S: KeyValueStore + ?Sized + 'static> CatalogView<S> {
    /// Create the screen over `catalog` with its own controller.
    pub fn new(catalog: Arc<dyn CatalogSource>, controller: CartController<S>) -> Self {
        Self {
            catalog,
            controller,
        }
    }

    /// Call when the screen mounts or regains focus.
    pub async fn on_focus(&mut self) {
        self.controller.refresh().await;
    }

    /// Catalog items in order, flagged with cart membership.
    pub fn listings(&self) -> Vec<Listing<'_>> {
        let cart = self.controller.cart();
        self.catalog
            .items()
            .iter()
            .map(|item| Listing {
                item,
                in_cart: cart.contains(item.id),
            })
            .collect()
    }

    /// Add the catalog item with `id` to the cart.
    pub async fn add_to_cart(&mut self, id: ItemId) -> AddOutcome {
        let Some(item) = self.catalog.get(id).cloned() else {
            tracing::debug!(id = %id, "add for unknown catalog item");
            return AddOutcome::UnknownItem;
        };
        if self.controller.state() == CartState::Unloaded {
            self.controller.refresh().await;
        }
        let before = self.controller.cart().len();
        let after = self.controller.add(&item).await.len();
        if after > before {
            AddOutcome::Added
        } else {
            AddOutcome::AlreadyInCart
        }
    }

    /// Number of entries shown on the cart badge.
    pub fn badge_count(&self) -> usize {
        self.controller.cart().len()
    }

    /// The catalog this screen lists.
    pub fn catalog(&self) -> &dyn CatalogSource {
        self.catalog.as_ref()
    }

    /// The screen's controller, e.g. to flush background saves.
    pub fn controller_mut(&mut self) -> &mut CartController<S> {
        &mut self.controller
    }
}
