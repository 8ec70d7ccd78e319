//! Catalog sources.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::Item;
use crate::error::CartError;
use crate::ids::ItemId;
use crate::money::Price;

/// Read-only, ordered sequence of purchasable items.
pub trait CatalogSource: Send + Sync {
    /// All items in display order.
    fn items(&self) -> &[Item];

    /// Look up an item by id.
    fn get(&self, id: ItemId) -> Option<&Item> {
        self.items().iter().find(|item| item.id == id)
    }

    /// Number of items.
    fn len(&self) -> usize {
        self.items().len()
    }

    /// Check if the catalog has no items.
    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// Catalog backed by a fixed list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticCatalog {
    items: Vec<Item>,
}

/// On-disk catalog layout for TOML files (`[[items]]` tables).
#[derive(Deserialize)]
struct CatalogFile {
    items: Vec<Item>,
}

impl StaticCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(items: Vec<Item>) -> Result<Self, CartError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CartError::DuplicateItem(item.id));
            }
        }
        Ok(Self { items })
    }

    /// Load a catalog from a `.json` array or a `.toml` file with `[[items]]`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CartError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CartError::Catalog(format!("{}: {}", path.display(), e)))?;

        let items = if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str::<CatalogFile>(&content)
                .map_err(|e| CartError::Catalog(format!("{}: {}", path.display(), e)))?
                .items
        } else {
            serde_json::from_str::<Vec<Item>>(&content)
                .map_err(|e| CartError::Catalog(format!("{}: {}", path.display(), e)))?
        };

        tracing::debug!(path = %path.display(), items = items.len(), "loaded catalog");
        Self::new(items)
    }

    /// The built-in demo catalog.
    pub fn demo() -> Self {
        let cardigan = |id: i64, name: &str, description: &str, image: &str| {
            Item::new(
                id,
                name,
                description,
                Price::from_cents(12000).unwrap_or_default(),
                image,
            )
        };

        Self {
            items: vec![
                cardigan(1, "Office Wear", "reversible angora cardigan", "assets/dress1.png"),
                cardigan(2, "Black", "reversible angora cardigan", "assets/dress2.png"),
                cardigan(3, "Church Wear", "reversible angora cardigan", "assets/dress3.png"),
                cardigan(4, "Lamerei", "reversible angora cardigan", "assets/dress4.png"),
                cardigan(5, "21WN", "reversible angora cardigan", "assets/dress5.png"),
                cardigan(6, "Lopo", "reversible angora cardigan", "assets/dress6.png"),
                cardigan(7, "21WN", "reversible angora cardigan", "assets/dress7.png"),
                cardigan(8, "Lame", "reversible angora cardigan", "assets/dress3.png"),
            ],
        }
    }
}

impl CatalogSource for StaticCatalog {
    fn items(&self) -> &[Item] {
        &self.items
    }
}
