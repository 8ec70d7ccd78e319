//! Checkout screen model.

use storefront_kv::KeyValueStore;

use crate::cart::{CartController, CartEntry, CartState};
use crate::ids::ItemId;
use crate::money::Price;

/// Label shown next to the cart total.
pub const TOTAL_LABEL: &str = "EST. TOTAL";

/// Result of tapping "remove" on a cart row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The entry was removed.
    Removed,
    /// No entry had that id; nothing changed.
    NotInCart,
}

/// Result of tapping the checkout button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Checkout is display-only; the cart is left as is.
    Unavailable,
}

/// The checkout screen: lists cart entries with a running total.
pub struct CartView<S: ?Sized> {
    controller: CartController<S>,
}

impl<S: KeyValueStore + ?Sized + 'static> CartView<S> {
    /// Create the screen around its own controller.
    pub fn new(controller: CartController<S>) -> Self {
        Self { controller }
    }

    /// Call whenever the screen gains focus.
    pub async fn on_focus(&mut self) {
        self.controller.refresh().await;
    }

    /// Cart entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        self.controller.cart().entries()
    }

    /// Check if the cart has no entries.
    pub fn is_empty(&self) -> bool {
        self.controller.cart().is_empty()
    }

    /// Remove the entry with `id`.
    pub async fn remove(&mut self, id: ItemId) -> RemoveOutcome {
        if self.controller.state() == CartState::Unloaded {
            self.controller.refresh().await;
        }
        let before = self.controller.cart().len();
        let after = self.controller.remove(id).await.len();
        if after < before {
            RemoveOutcome::Removed
        } else {
            RemoveOutcome::NotInCart
        }
    }

    /// Estimated total, recomputed from the current entries.
    pub fn total(&self) -> Price {
        self.controller.total()
    }

    /// The checkout button. Does nothing beyond logging the tap.
    pub fn checkout(&self) -> CheckoutOutcome {
        tracing::info!(
            entries = self.controller.cart().len(),
            total = %self.total(),
            "checkout tapped, payment is not available"
        );
        CheckoutOutcome::Unavailable
    }

    /// The screen's controller, e.g. to flush background saves.
    pub fn controller_mut(&mut self) -> &mut CartController<S> {
        &mut self.controller
    }
}
