//! Cart and cart entry types.

use crate::catalog::{AssetRef, Item};
use crate::ids::ItemId;
use crate::money::Price;
use serde::{Deserialize, Serialize};

/// A snapshot of an item taken when it was added to the cart.
///
/// Entries are self-contained: later catalog changes do not reach them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Item identifier.
    pub id: ItemId,
    /// Item name at add time.
    pub name: String,
    /// Item description at add time.
    pub description: String,
    /// Item price at add time.
    pub price: Price,
    /// Item image at add time.
    pub image: AssetRef,
}

impl From<&Item> for CartEntry {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            image: item.image.clone(),
        }
    }
}

/// A shopping cart.
///
/// Ordered by insertion and unique by item id. Serializes as a bare JSON
/// array of entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartEntry>", into = "Vec<CartEntry>")]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a cart from entries, keeping the first entry for each id.
    pub fn from_entries(entries: impl IntoIterator<Item = CartEntry>) -> Self {
        let mut cart = Self::new();
        for entry in entries {
            if cart.contains(entry.id) {
                tracing::debug!(id = %entry.id, "dropping duplicate cart entry");
                continue;
            }
            cart.entries.push(entry);
        }
        cart
    }

    /// Add a snapshot of `item`.
    ///
    /// Returns `false` and leaves the cart untouched if an entry with the
    /// same id is already present.
    pub fn insert(&mut self, item: &Item) -> bool {
        if self.contains(item.id) {
            return false;
        }
        self.entries.push(CartEntry::from(item));
        true
    }

    /// Remove the entry with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() < len_before
    }

    /// Sum of entry prices.
    pub fn total(&self) -> Price {
        self.entries.iter().map(|e| &e.price).sum()
    }

    /// Check if an entry with `id` is present.
    pub fn contains(&self, id: ItemId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Get an entry by id.
    pub fn get(&self, id: ItemId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> Vec<ItemId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries.
    pub fn iter(&self) -> std::slice::Iter<'_, CartEntry> {
        self.entries.iter()
    }
}

impl From<Vec<CartEntry>> for Cart {
    fn from(entries: Vec<CartEntry>) -> Self {
        Cart::from_entries(entries)
    }
}

impl From<Cart> for Vec<CartEntry> {
    fn from(cart: Cart) -> Self {
        cart.entries
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartEntry;
    type IntoIter = std::slice::Iter<'a, CartEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, price: f64) -> Item {
        Item::new(
            id,
            format!("Item {}", id),
            "test item",
            Price::from_decimal(price).unwrap(),
            "assets/test.png",
        )
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_insert_appends_snapshot() {
        let mut cart = Cart::new();
        let hat = item(1, 10.0);

        assert!(cart.insert(&hat));

        let entry = cart.get(ItemId::new(1)).unwrap();
        assert_eq!(entry.name, hat.name);
        assert_eq!(entry.price, hat.price);
        assert_eq!(entry.image, hat.image);
    }

    #[test]
    fn test_insert_same_id_is_ignored() {
        let mut cart = Cart::new();
        assert!(cart.insert(&item(1, 10.0)));
        assert!(!cart.insert(&item(1, 99.0)));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Price::from_decimal(10.0).unwrap());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.insert(&item(3, 1.0));
        cart.insert(&item(1, 1.0));
        cart.insert(&item(2, 1.0));

        assert_eq!(
            cart.ids(),
            vec![ItemId::new(3), ItemId::new(1), ItemId::new(2)]
        );
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.insert(&item(1, 1.0));
        cart.insert(&item(2, 1.0));

        assert!(cart.remove(ItemId::new(1)));
        assert_eq!(cart.ids(), vec![ItemId::new(2)]);
    }

    #[test]
    fn test_remove_absent_id() {
        let mut cart = Cart::new();
        cart.insert(&item(1, 1.0));
        let before = cart.clone();

        assert!(!cart.remove(ItemId::new(42)));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_total() {
        let mut cart = Cart::new();
        cart.insert(&item(1, 10.0));
        cart.insert(&item(2, 5.5));

        assert_eq!(cart.total().to_decimal(), 15.5);
    }

    #[test]
    fn test_snapshot_is_independent_of_item() {
        let mut cart = Cart::new();
        let mut hat = item(1, 10.0);
        cart.insert(&hat);

        hat.name = "Renamed".to_string();
        hat.price = Price::from_decimal(1.0).unwrap();

        let entry = cart.get(ItemId::new(1)).unwrap();
        assert_eq!(entry.name, "Item 1");
        assert_eq!(entry.price.cents(), 1000);
    }

    #[test]
    fn test_from_entries_drops_duplicates() {
        let a = CartEntry::from(&item(1, 1.0));
        let b = CartEntry::from(&item(1, 2.0));
        let c = CartEntry::from(&item(2, 3.0));

        let cart = Cart::from_entries(vec![a.clone(), b, c]);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(ItemId::new(1)), Some(&a));
    }

    #[test]
    fn test_serializes_as_array() {
        let mut cart = Cart::new();
        cart.insert(&item(1, 10.0));

        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["price"], 10.0);
    }
}
