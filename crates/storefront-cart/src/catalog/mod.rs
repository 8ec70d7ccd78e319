//! Product catalog module.
//!
//! Contains the item type and read-only catalog sources.

mod item;
mod source;

pub use item::{AssetRef, Item};
pub use source::{CatalogSource, StaticCatalog};
