//! Cart state.

use serde::{Deserialize, Serialize};

use crate::cart::CartItem;
use crate::ids::ItemId;

/// An ordered sequence of line items, at most one per id.
///
/// Serializes as a bare JSON array. Insertion order is preserved; adding an
/// id that is already present updates that entry in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from persisted items, folding duplicate ids together and
    /// clamping quantities.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.add_item(item);
        }
        cart
    }

    /// Add an item.
    ///
    /// If the id is already present its quantity grows by the offered
    /// quantity; otherwise the item is appended. An offered quantity below 1
    /// counts as 1.
    pub fn add_item(&mut self, mut item: CartItem) {
        let offered = item.quantity.max(1);

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(offered);
            return;
        }

        item.quantity = offered;
        self.items.push(item);
    }

    /// Remove the item with `id`. Returns whether anything was removed.
    pub fn remove_item(&mut self, id: &ItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() < len_before
    }

    /// Set the quantity of `id`, clamped to at least 1.
    ///
    /// Returns `false` for unknown ids.
    pub fn update_quantity(&mut self, id: &ItemId, quantity: i64) -> bool {
        match self.items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.quantity = quantity.max(1);
                true
            }
            None => false,
        }
    }

    /// Sum of price times quantity. No rounding is applied.
    pub fn calculate_total(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Total number of units (sum of quantities), saturating at `i64::MAX`.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |n, i| n.saturating_add(i.quantity))
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by id.
    pub fn get(&self, id: &ItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Items in display order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn item(id: &str, price: f64, quantity: i64) -> CartItem {
        CartItem::new(id, format!("Item {}", id), price, format!("/{}.jpg", id))
            .with_quantity(quantity)
    }

    #[test]
    fn test_add_same_id_merges() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 100.0, 1));
        cart.add_item(item("A", 100.0, 2));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&"A".into()).unwrap().quantity, 3);
        assert_eq!(cart.calculate_total(), 300.0);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 1.0, 1));
        cart.add_item(item("B", 1.0, 1));
        cart.add_item(item("A", 1.0, 1));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_add_non_positive_quantity_counts_as_one() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 10.0, 0));
        cart.add_item(item("A", 10.0, -4));
        assert_eq!(cart.get(&"A".into()).unwrap().quantity, 2);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 10.0, 1));
        cart.add_item(item("B", 20.0, 2));
        let before = cart.clone();

        assert!(!cart.remove_item(&"Z".into()));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 10.0, 1));
        assert!(cart.remove_item(&"A".into()));
        assert!(cart.is_empty());
        assert_eq!(cart.calculate_total(), 0.0);
    }

    #[test]
    fn test_update_quantity_clamps() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 10.0, 5));

        assert!(cart.update_quantity(&"A".into(), 0));
        assert_eq!(cart.get(&"A".into()).unwrap().quantity, 1);

        assert!(cart.update_quantity(&"A".into(), -3));
        assert_eq!(cart.get(&"A".into()).unwrap().quantity, 1);

        assert!(cart.update_quantity(&"A".into(), 7));
        assert_eq!(cart.get(&"A".into()).unwrap().quantity, 7);
    }

    #[test]
    fn test_update_unknown_id_ignored() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 10.0, 1));
        assert!(!cart.update_quantity(&"B".into(), 4));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_item_count_saturates() {
        let cart = Cart::from_items([item("A", 1.0, i64::MAX), item("B", 1.0, 2)]);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), i64::MAX);
    }

    #[test]
    fn test_item_count() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 10.0, 2));
        cart.add_item(item("B", 10.0, 3));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_cart_is_a_json_array() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 10.0, 2));
        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.starts_with('['));

        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_from_items_folds_duplicates() {
        let cart = Cart::from_items(vec![item("A", 5.0, 1), item("A", 5.0, 2), item("B", 1.0, 0)]);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(&"A".into()).unwrap().quantity, 3);
        assert_eq!(cart.get(&"B".into()).unwrap().quantity, 1);
    }

    proptest! {
        #[test]
        fn prop_one_entry_per_id_with_summed_quantity(
            adds in prop::collection::vec((0usize..4, 1i64..20), 0..40)
        ) {
            let ids = ["A", "B", "C", "D"];
            let mut cart = Cart::new();
            let mut expected: HashMap<&str, i64> = HashMap::new();

            for (idx, qty) in &adds {
                cart.add_item(item(ids[*idx], 10.0, *qty));
                *expected.entry(ids[*idx]).or_default() += qty;
            }

            prop_assert_eq!(cart.len(), expected.len());
            for entry in cart.items() {
                prop_assert_eq!(Some(&entry.quantity), expected.get(entry.id.as_str()));
            }
        }

        #[test]
        fn prop_update_quantity_clamps_to_one(q in -1000i64..1000) {
            let mut cart = Cart::new();
            cart.add_item(item("A", 10.0, 1));
            cart.update_quantity(&"A".into(), q);

            let stored = cart.get(&"A".into()).unwrap().quantity;
            if q <= 0 {
                prop_assert_eq!(stored, 1);
            } else {
                prop_assert_eq!(stored, q);
            }
        }

        #[test]
        fn prop_total_is_sum_of_subtotals(
            lines in prop::collection::vec((0.0f64..10_000.0, 1i64..50), 0..20)
        ) {
            let mut cart = Cart::new();
            for (n, (price, qty)) in lines.iter().enumerate() {
                cart.add_item(item(&n.to_string(), *price, *qty));
            }

            let expected: f64 = lines.iter().map(|(p, q)| p * *q as f64).sum();
            prop_assert!((cart.calculate_total() - expected).abs() <= 1e-6 * expected.max(1.0));
        }
    }
}
