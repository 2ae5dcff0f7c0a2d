//! Persisted cart.

use serde::{Deserialize, Serialize};
use storefront_cache::{Cache, KeyValueStore};

use crate::cart::{Cart, CartItem};
use crate::checkout::CheckoutPayload;
use crate::error::CommerceError;
use crate::ids::ItemId;

/// Storage keys the cart reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// Key holding the JSON array of line items.
    pub cart: String,
    /// Key holding the checkout handoff payload.
    pub checkout: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            cart: "cart".to_string(),
            checkout: "checkout_data".to_string(),
        }
    }
}

/// The page's single cart, kept in sync with storage.
///
/// Loaded once at startup; every mutation writes the whole item array back.
/// Storage failures are logged and never surface to callers of the
/// mutators.
#[derive(Debug)]
pub struct CartService<S> {
    cart: Cart,
    cache: Cache<S>,
    keys: StorageKeys,
}

impl<S: KeyValueStore> CartService<S> {
    /// Load the cart from `store`. Absent or unparseable data yields an
    /// empty cart.
    pub fn load(store: S, keys: StorageKeys) -> Self {
        let cache = Cache::new(store);
        let cart = read_cart(&cache, &keys.cart);
        tracing::debug!(items = cart.len(), key = %keys.cart, "cart loaded");
        Self { cart, cache, keys }
    }

    /// Current cart contents.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Storage keys in use.
    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Add an item, merging with an existing entry of the same id.
    pub fn add_item(&mut self, item: CartItem) {
        tracing::debug!(id = %item.id, name = %item.name, price = item.price, quantity = item.quantity, "adding item to cart");
        self.cart.add_item(item);
        self.persist();
    }

    /// Remove an item. Always persists, even when `id` was absent.
    pub fn remove_item(&mut self, id: &ItemId) -> bool {
        let removed = self.cart.remove_item(id);
        self.persist();
        removed
    }

    /// Set an item's quantity (clamped to at least 1). Unknown ids are
    /// ignored and nothing is written.
    pub fn update_quantity(&mut self, id: &ItemId, quantity: i64) -> bool {
        let updated = self.cart.update_quantity(id, quantity);
        if updated {
            self.persist();
        }
        updated
    }

    /// Sum of price times quantity over all items.
    pub fn calculate_total(&self) -> f64 {
        for item in self.cart.items() {
            tracing::trace!(item = %item.name, price = item.price, quantity = item.quantity, total = item.subtotal(), "item total");
        }
        self.cart.calculate_total()
    }

    /// Write the cart to storage.
    pub fn save(&self) -> Result<(), CommerceError> {
        self.cache.set(&self.keys.cart, &self.cart)?;
        tracing::debug!(items = self.cart.len(), "cart saved");
        Ok(())
    }

    /// Re-read the cart from storage, e.g. after another tab changed it.
    ///
    /// Returns whether the contents changed.
    pub fn reload(&mut self) -> bool {
        let fresh = read_cart(&self.cache, &self.keys.cart);
        if fresh == self.cart {
            return false;
        }
        tracing::debug!(before = self.cart.len(), after = fresh.len(), "cart reloaded from storage");
        self.cart = fresh;
        true
    }

    /// Validate the cart and hand a snapshot to the checkout page.
    ///
    /// Fails with [`CommerceError::EmptyCart`] or
    /// [`CommerceError::InvalidTotal`] without touching storage.
    pub fn begin_checkout(&self, timestamp: i64) -> Result<CheckoutPayload, CommerceError> {
        if self.cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let total = self.calculate_total();
        if total.is_nan() || total <= 0.0 {
            return Err(CommerceError::InvalidTotal(total));
        }

        let payload = CheckoutPayload::new(self.cart.items().to_vec(), total, timestamp);
        self.cache.set(&self.keys.checkout, &payload)?;
        tracing::info!(items = payload.items.len(), total, "checkout payload stored");
        Ok(payload)
    }

    /// Read back the stored checkout payload, if any.
    pub fn checkout_payload(&self) -> Result<Option<CheckoutPayload>, CommerceError> {
        Ok(self.cache.get(&self.keys.checkout)?)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::error!(error = %e, "failed to save cart");
        }
    }
}

fn read_cart<S: KeyValueStore>(cache: &Cache<S>, key: &str) -> Cart {
    match cache.get::<Vec<CartItem>>(key) {
        Ok(Some(items)) => Cart::from_items(items),
        Ok(None) => Cart::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable cart");
            Cart::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_cache::{KeyValueStore, MemoryStore};

    fn item(id: &str, price: f64, quantity: i64) -> CartItem {
        CartItem::new(id, format!("Item {}", id), price, "/img.jpg").with_quantity(quantity)
    }

    fn service(store: &MemoryStore) -> CartService<MemoryStore> {
        CartService::load(store.clone(), StorageKeys::default())
    }

    #[test]
    fn test_load_absent_is_empty() {
        let cart = service(&MemoryStore::new());
        assert!(cart.cart().is_empty());
    }

    #[test]
    fn test_load_unparseable_is_empty() {
        let store = MemoryStore::with_entries([("cart", "not json")]);
        let cart = service(&store);
        assert!(cart.cart().is_empty());
    }

    #[test]
    fn test_load_keeps_items_with_null_quantity() {
        let store = MemoryStore::with_entries([(
            "cart",
            r#"[{"id":"A","name":"Kurta","price":100,"image":"/a.jpg","quantity":null},
                {"id":7,"name":"Saree","price":50,"image":"/b.jpg","quantity":2}]"#,
        )]);
        let cart = service(&store);

        assert_eq!(cart.cart().len(), 2);
        assert_eq!(cart.cart().get(&"A".into()).unwrap().quantity, 1);
        assert_eq!(cart.cart().get(&"7".into()).unwrap().quantity, 2);
        assert_eq!(cart.calculate_total(), 200.0);
    }

    #[test]
    fn test_every_mutation_persists() {
        let store = MemoryStore::new();
        let mut cart = service(&store);

        cart.add_item(item("A", 100.0, 1));
        cart.add_item(item("A", 100.0, 2));
        assert_eq!(service(&store).cart().get(&"A".into()).unwrap().quantity, 3);

        cart.update_quantity(&"A".into(), 5);
        assert_eq!(service(&store).cart().get(&"A".into()).unwrap().quantity, 5);

        cart.remove_item(&"A".into());
        assert!(service(&store).cart().is_empty());
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_persisted_round_trip() {
        let store = MemoryStore::new();
        let mut cart = service(&store);
        cart.add_item(item("A", 12.5, 2).with_option("color", "blue"));
        cart.add_item(item("B", 3.0, 1));

        let reloaded = service(&store);
        assert_eq!(reloaded.cart(), cart.cart());
    }

    #[test]
    fn test_remove_missing_id_still_writes() {
        let store = MemoryStore::new();
        let mut cart = service(&store);
        assert!(!cart.remove_item(&"nope".into()));
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_update_unknown_id_does_not_write() {
        let store = MemoryStore::new();
        let mut cart = service(&store);
        assert!(!cart.update_quantity(&"nope".into(), 3));
        assert!(store.is_empty());
    }

    #[test]
    fn test_reload_picks_up_other_writer() {
        let store = MemoryStore::new();
        let mut tab_a = service(&store);
        let mut tab_b = service(&store);

        tab_a.add_item(item("A", 10.0, 1));
        assert!(tab_b.reload());
        assert_eq!(tab_b.cart().len(), 1);
        assert!(!tab_b.reload());
    }

    #[test]
    fn test_checkout_empty_cart() {
        let store = MemoryStore::new();
        let cart = service(&store);

        let err = cart.begin_checkout(1).unwrap_err();
        assert!(matches!(err, CommerceError::EmptyCart));
        assert!(err.is_user_facing());
        assert!(store.get("checkout_data").unwrap().is_none());
    }

    #[test]
    fn test_checkout_zero_total() {
        let store = MemoryStore::new();
        let mut cart = service(&store);
        cart.add_item(item("FREE", 0.0, 1));

        let err = cart.begin_checkout(1).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidTotal(_)));
        assert_eq!(err.to_string(), "Invalid cart total. Please try again.");
        assert!(store.get("checkout_data").unwrap().is_none());
    }

    #[test]
    fn test_checkout_writes_payload() {
        let store = MemoryStore::new();
        let mut cart = service(&store);
        cart.add_item(item("A", 100.0, 3));

        let payload = cart.begin_checkout(1_700_000_000_000).unwrap();
        assert_eq!(payload.total, 300.0);
        assert_eq!(payload.timestamp, 1_700_000_000_000);

        let stored = cart.checkout_payload().unwrap().unwrap();
        assert_eq!(stored, payload);

        let raw: serde_json::Value =
            serde_json::from_str(&store.get("checkout_data").unwrap().unwrap()).unwrap();
        assert_eq!(raw["items"][0]["id"], "A");
        assert_eq!(raw["total"], 300.0);
    }

    #[test]
    fn test_custom_keys() {
        let store = MemoryStore::new();
        let keys = StorageKeys {
            cart: "shop:cart".to_string(),
            checkout: "shop:checkout".to_string(),
        };
        let mut cart = CartService::load(store.clone(), keys);
        cart.add_item(item("A", 1.0, 1));
        assert!(store.get("shop:cart").unwrap().is_some());
        assert!(store.get("cart").unwrap().is_none());
    }
}
