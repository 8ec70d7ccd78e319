//! Catalog item types.

use crate::ids::ItemId;
use crate::money::Price;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to an item image.
///
/// Bundled assets are addressed by number, remote or file assets by URI.
/// Serialized untagged, so `"image": 3` and `"image": "assets/dress.png"`
/// are both accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetRef {
    /// Bundled asset number.
    Bundled(u64),
    /// URI or relative asset path.
    Uri(String),
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetRef::Bundled(n) => write!(f, "asset#{}", n),
            AssetRef::Uri(uri) => write!(f, "{}", uri),
        }
    }
}

impl From<&str> for AssetRef {
    fn from(uri: &str) -> Self {
        AssetRef::Uri(uri.to_string())
    }
}

/// A purchasable item.
///
/// Items are owned by the catalog and never mutated by the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique item identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Product image.
    pub image: AssetRef,
}

impl Item {
    /// Create a new item.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        image: impl Into<AssetRef>,
    ) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            description: description.into(),
            price,
            image: image.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_ref_untagged() {
        let bundled: AssetRef = serde_json::from_str("12").unwrap();
        assert_eq!(bundled, AssetRef::Bundled(12));

        let uri: AssetRef = serde_json::from_str(r#""assets/dress1.png""#).unwrap();
        assert_eq!(uri, AssetRef::from("assets/dress1.png"));
    }

    #[test]
    fn test_item_json_shape() {
        let item = Item::new(
            1,
            "Office Wear",
            "reversible angora cardigan",
            Price::from_decimal(120.0).unwrap(),
            "assets/dress1.png",
        );
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["name"], "Office Wear");
        assert_eq!(value["price"], 120.0);
        assert_eq!(value["image"], "assets/dress1.png");
    }
}
