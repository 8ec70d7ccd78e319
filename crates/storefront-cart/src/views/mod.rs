//! Screen models.
//!
//! Each screen owns its own [`CartController`](crate::cart::CartController);
//! the store is the only thing they share. Render code reads from these
//! models and forwards taps to them.

mod cart_view;
mod catalog_view;

pub use cart_view::{CartView, CheckoutOutcome, RemoveOutcome, TOTAL_LABEL};
pub use catalog_view::{AddOutcome, CatalogView, Listing};
