//! Asynchronous key-value persistence for the storefront.
//!
//! Provides the [`KeyValueStore`] port the cart repository is written
//! against, plus two implementations:
//!
//! - [`MemoryStore`]: shared in-process map, used in tests and demos
//! - [`FileStore`]: one file per key under a directory, survives restarts
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_kv::{FileStore, KeyValueStore};
//!
//! let store = FileStore::open("./data").await?;
//! store.set("Cart", "[]").await?;
//! let raw: Option<String> = store.get("Cart").await?;
//! ```

mod error;
mod file;
mod memory;
mod store;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::KeyValueStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, KeyValueStore, MemoryStore, StoreError, StoreResult};
}
