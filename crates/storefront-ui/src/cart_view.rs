//! Cart manager: the persisted cart plus every region that shows it.

use std::cell::RefCell;
use std::rc::Rc;

use storefront_cache::KeyValueStore;
use storefront_commerce::cart::{CartItem, CartService};
use storefront_commerce::checkout::CheckoutPayload;
use storefront_commerce::product::parse_quantity;
use storefront_commerce::{now_millis, ItemId, PriceFormat};

use crate::config::StorefrontConfig;
use crate::page::{Action, Anchor, Binding, CartAction, Notice, Page, ProductContainer, UiEvent};
use crate::sections::{render_cart_table, render_mini_cart};

/// Toast shown after an item is added.
pub const ADD_SUCCESS_MESSAGE: &str = "Item added to cart successfully!";

/// Shared handle to the page's single cart manager.
///
/// Created once by [`Storefront`](crate::Storefront) and passed to the
/// catalog and product-page controllers at construction.
pub type CartHandle<S> = Rc<RefCell<CartManager<S>>>;

/// Owns the cart and repaints the cart regions after every mutation.
#[derive(Debug)]
pub struct CartManager<S> {
    service: CartService<S>,
    format: PriceFormat,
    checkout_url: String,
}

impl<S: KeyValueStore> CartManager<S> {
    /// Load the persisted cart from `store`.
    pub fn load(store: S, config: &StorefrontConfig) -> Self {
        Self {
            service: CartService::load(store, config.storage.clone()),
            format: config.price.clone(),
            checkout_url: config.checkout_url.clone(),
        }
    }

    pub fn into_handle(self) -> CartHandle<S> {
        Rc::new(RefCell::new(self))
    }

    pub fn service(&self) -> &CartService<S> {
        &self.service
    }

    /// Display locale shared with the other controllers.
    pub fn format(&self) -> &PriceFormat {
        &self.format
    }

    pub fn format_price(&self, value: f64) -> String {
        self.format.format(value)
    }

    pub fn parse_price(&self, text: &str) -> f64 {
        self.format.parse(text)
    }

    pub fn calculate_total(&self) -> f64 {
        self.service.calculate_total()
    }

    pub fn add_item(&mut self, item: CartItem, page: &mut dyn Page) {
        self.service.add_item(item);
        self.render(page);
    }

    pub fn remove_item(&mut self, id: &ItemId, page: &mut dyn Page) {
        self.service.remove_item(id);
        self.render(page);
    }

    /// Set a quantity, clamped to at least 1. Unknown ids change nothing.
    pub fn update_quantity(&mut self, id: &ItemId, quantity: i64, page: &mut dyn Page) {
        if self.service.update_quantity(id, quantity) {
            self.render(page);
        }
    }

    /// Add an item, then confirm with a toast and a cart icon pulse.
    pub fn add_with_notice(&mut self, item: CartItem, page: &mut dyn Page) {
        self.add_item(item, page);
        page.notify(Notice::success(ADD_SUCCESS_MESSAGE));
        page.pulse_cart_icon();
    }

    /// First positive price found in the container, or `None`.
    pub fn product_price(&self, container: &ProductContainer) -> Option<f64> {
        container.price_sources().resolve(&self.format)
    }

    /// Build a line item from a product container and add it.
    ///
    /// Returns `None`, with an error logged, when the container lacks a
    /// price, name or image.
    pub fn add_from_container(
        &mut self,
        container: &ProductContainer,
        page: &mut dyn Page,
    ) -> Option<ItemId> {
        let Some(price) = self.product_price(container) else {
            tracing::error!(
                base_price = ?container.base_price,
                amount = ?container.amount,
                special_amount = ?container.special_amount,
                "invalid price"
            );
            return None;
        };
        let Some(name) = container.name.as_deref().map(str::trim) else {
            tracing::error!("name element not found");
            return None;
        };
        let Some(image) = container.image.as_deref() else {
            tracing::error!("image element not found");
            return None;
        };

        let id = container
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(ItemId::new)
            .unwrap_or_else(ItemId::generate);
        let quantity = container.quantity.as_deref().map_or(1, parse_quantity);

        let item = CartItem::new(id.clone(), name, price, image).with_quantity(i64::from(quantity));
        self.add_with_notice(item, page);
        Some(id)
    }

    /// Validate the cart and hand it to the checkout page.
    ///
    /// On failure the user sees an error toast and nothing is written.
    pub fn checkout(&mut self, page: &mut dyn Page) -> Option<CheckoutPayload> {
        match self.service.begin_checkout(now_millis()) {
            Ok(payload) => {
                page.navigate(&self.checkout_url);
                Some(payload)
            }
            Err(e) => {
                tracing::warn!(error = %e, "checkout rejected");
                page.notify(Notice::error(e.to_string()));
                None
            }
        }
    }

    /// Reload after another tab wrote the cart. Repaints when it changed.
    pub fn sync(&mut self, page: &mut dyn Page) -> bool {
        let changed = self.service.reload();
        if changed {
            self.render(page);
        }
        changed
    }

    /// Repaint the item count, mini-cart, totals and cart table.
    pub fn render(&self, page: &mut dyn Page) {
        let cart = self.service.cart();
        let total = self.format_price(self.calculate_total());

        page.set_text(Anchor::CartCount, &cart.item_count().to_string());
        page.show(Anchor::MiniCartItems, render_mini_cart(cart.items(), &self.format));
        page.set_text(Anchor::CartTotal, &total);
        if page.show(Anchor::CartTable, render_cart_table(cart.items(), &self.format)) {
            page.set_text(Anchor::CartTableTotal, &total);
        }
    }

    /// Subscriptions for cart controls authored into the page.
    pub fn static_bindings() -> Vec<Binding> {
        vec![
            Binding::click(
                ".wc-proceed-to-checkout a",
                Action::Cart(CartAction::Checkout),
            ),
            Binding::click(
                r#".nav-cart-actions a[href*="checkout"]"#,
                Action::Cart(CartAction::Checkout),
            ),
            Binding::click(
                ".product-item .add_to_cart_button",
                Action::Cart(CartAction::AddFromContainer),
            ),
        ]
    }

    pub fn handle(&mut self, action: &CartAction, event: &UiEvent, page: &mut dyn Page) {
        match action {
            CartAction::AddFromContainer => match &event.container {
                Some(container) => {
                    self.add_from_container(container, page);
                }
                None => tracing::error!("product container not found"),
            },
            CartAction::Remove(id) => self.remove_item(id, page),
            CartAction::Increment(id) => {
                if let Some(item) = self.service.cart().get(id) {
                    let quantity = item.quantity.saturating_add(1);
                    self.update_quantity(id, quantity, page);
                }
            }
            CartAction::Decrement(id) => {
                if let Some(item) = self.service.cart().get(id) {
                    let quantity = item.quantity - 1;
                    self.update_quantity(id, quantity, page);
                }
            }
            CartAction::SetQuantity(id) => {
                let quantity = event.value.as_deref().map_or(1, parse_quantity);
                self.update_quantity(id, i64::from(quantity), page);
            }
            CartAction::Checkout => {
                self.checkout(page);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPage;
    use crate::page::{EventKind, NoticeKind};
    use storefront_cache::MemoryStore;

    fn manager() -> (CartManager<MemoryStore>, MemoryStore) {
        let store = MemoryStore::new();
        (CartManager::load(store.clone(), &StorefrontConfig::default()), store)
    }

    fn container(id: &str, amount: &str) -> ProductContainer {
        ProductContainer {
            id: Some(id.into()),
            amount: Some(amount.into()),
            name: Some(" Cotton Kurta ".into()),
            image: Some("/img/kurta.jpg".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_all_regions() {
        let (mut cart, _) = manager();
        let mut page = MemoryPage::cart_page();
        cart.add_item(CartItem::new("A", "Kurta", 100.0, "/a.jpg"), &mut page);
        cart.add_item(CartItem::new("A", "Kurta", 100.0, "/a.jpg").with_quantity(2), &mut page);
        cart.add_item(CartItem::new("B", "Saree", 1250.0, "/b.jpg"), &mut page);

        assert_eq!(page.content(Anchor::CartCount), Some("4"));
        assert_eq!(page.content(Anchor::CartTotal), Some("\u{20b9}1,550.00"));
        assert_eq!(page.content(Anchor::CartTableTotal), Some("\u{20b9}1,550.00"));
        assert_eq!(
            page.content(Anchor::CartTable).unwrap().matches("cart_item").count(),
            2
        );
        assert_eq!(page.bindings(Anchor::MiniCartItems).len(), 2);
    }

    #[test]
    fn test_render_huge_saved_quantity() {
        let store = MemoryStore::with_entries([(
            "cart",
            r#"[{"id":"A","name":"Kurta","price":1,"image":"/a.jpg","quantity":9223372036854775807},
                {"id":"B","name":"Scarf","price":1,"image":"/b.jpg","quantity":2}]"#,
        )]);
        let cart = CartManager::load(store, &StorefrontConfig::default());
        let mut page = MemoryPage::cart_page();
        cart.render(&mut page);

        assert_eq!(cart.service().cart().len(), 2);
        assert_eq!(page.content(Anchor::CartCount), Some(i64::MAX.to_string().as_str()));
    }

    #[test]
    fn test_table_total_needs_table() {
        let (mut cart, _) = manager();
        let mut page = MemoryPage::with_anchors(&[Anchor::CartCount, Anchor::CartTableTotal]);
        cart.add_item(CartItem::new("A", "Kurta", 100.0, "/a.jpg"), &mut page);
        assert_eq!(page.content(Anchor::CartCount), Some("1"));
        assert_eq!(page.content(Anchor::CartTableTotal), Some(""));
    }

    #[test]
    fn test_add_from_container() {
        let (mut cart, store) = manager();
        let mut page = MemoryPage::cart_page();
        let id = cart
            .add_from_container(&container("K1", "\u{20b9}1,499.00"), &mut page)
            .unwrap();

        let item = cart.service().cart().get(&id).unwrap();
        assert_eq!(item.name, "Cotton Kurta");
        assert_eq!(item.price, 1499.0);
        assert_eq!(item.quantity, 1);
        assert_eq!(page.notices(), &[Notice::success(ADD_SUCCESS_MESSAGE)]);
        assert_eq!(page.pulses(), 1);
        assert!(store.get("cart").unwrap().is_some());
    }

    #[test]
    fn test_add_from_container_aborts() {
        let (mut cart, store) = manager();
        let mut page = MemoryPage::cart_page();

        let no_price = container("K1", "Sold out");
        assert!(cart.add_from_container(&no_price, &mut page).is_none());

        let no_image = ProductContainer {
            image: None,
            ..container("K1", "\u{20b9}10.00")
        };
        assert!(cart.add_from_container(&no_image, &mut page).is_none());

        let no_name = ProductContainer {
            name: None,
            ..container("K1", "\u{20b9}10.00")
        };
        assert!(cart.add_from_container(&no_name, &mut page).is_none());

        assert!(cart.service().cart().is_empty());
        assert!(page.notices().is_empty());
        assert!(store.get("cart").unwrap().is_none());
    }

    #[test]
    fn test_container_quantity_and_base_price() {
        let (mut cart, _) = manager();
        let mut page = MemoryPage::new();
        let c = ProductContainer {
            base_price: Some("800".into()),
            quantity: Some("3".into()),
            ..container("K2", "\u{20b9}2,400.00")
        };
        let id = cart.add_from_container(&c, &mut page).unwrap();
        let item = cart.service().cart().get(&id).unwrap();
        assert_eq!(item.price, 800.0);
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn test_table_controls() {
        let (mut cart, _) = manager();
        let mut page = MemoryPage::cart_page();
        cart.add_item(CartItem::new("A", "Kurta", 100.0, "/a.jpg"), &mut page);

        let plus = page
            .fire(r#"tr.cart_item[data-id="A"] .plus"#, EventKind::Click, None)
            .unwrap();
        let Action::Cart(action) = &plus.action else { panic!("not a cart action") };
        cart.handle(action, &plus, &mut page);
        assert_eq!(cart.service().cart().get(&"A".into()).unwrap().quantity, 2);

        let minus = page
            .fire(r#"tr.cart_item[data-id="A"] .minus"#, EventKind::Click, None)
            .unwrap();
        let Action::Cart(action) = &minus.action else { panic!("not a cart action") };
        cart.handle(action, &minus, &mut page);
        cart.handle(action, &minus, &mut page);
        assert_eq!(cart.service().cart().get(&"A".into()).unwrap().quantity, 1);

        let typed = page
            .fire(r#"tr.cart_item[data-id="A"] .qty"#, EventKind::Change, Some("abc"))
            .unwrap();
        let Action::Cart(action) = &typed.action else { panic!("not a cart action") };
        cart.handle(action, &typed, &mut page);
        assert_eq!(cart.service().cart().get(&"A".into()).unwrap().quantity, 1);

        let remove = page
            .fire(r#".nav-cart-item[data-id="A"] .remove"#, EventKind::Click, None)
            .unwrap();
        let Action::Cart(action) = &remove.action else { panic!("not a cart action") };
        cart.handle(action, &remove, &mut page);
        assert!(cart.service().cart().is_empty());
        assert_eq!(page.content(Anchor::CartCount), Some("0"));
        assert!(page.bindings(Anchor::CartTable).is_empty());
    }

    #[test]
    fn test_checkout_empty_cart() {
        let (mut cart, store) = manager();
        let mut page = MemoryPage::cart_page();
        assert!(cart.checkout(&mut page).is_none());

        let notice = &page.notices()[0];
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Your cart is empty. Please add items before checkout.");
        assert!(page.navigations().is_empty());
        assert!(store.get("checkout_data").unwrap().is_none());
    }

    #[test]
    fn test_checkout_zero_total() {
        let (mut cart, store) = manager();
        let mut page = MemoryPage::cart_page();
        cart.add_item(CartItem::new("F", "Free sample", 0.0, "/f.jpg"), &mut page);
        assert!(cart.checkout(&mut page).is_none());
        assert_eq!(page.notices()[0].message, "Invalid cart total. Please try again.");
        assert!(store.get("checkout_data").unwrap().is_none());
    }

    #[test]
    fn test_checkout_navigates() {
        let (mut cart, store) = manager();
        let mut page = MemoryPage::cart_page();
        cart.add_item(CartItem::new("A", "Kurta", 100.0, "/a.jpg").with_quantity(3), &mut page);

        let payload = cart.checkout(&mut page).unwrap();
        assert_eq!(payload.total, 300.0);
        assert_eq!(page.navigations(), &["shop-checkout.html".to_string()]);
        assert!(store.get("checkout_data").unwrap().is_some());
    }

    #[test]
    fn test_sync_from_other_tab() {
        let (mut cart, store) = manager();
        let mut page = MemoryPage::cart_page();
        assert!(!cart.sync(&mut page));

        store
            .set("cart", r#"[{"id":"X","name":"Dupatta","price":450,"image":"/x.jpg","quantity":2}]"#)
            .unwrap();
        assert!(cart.sync(&mut page));
        assert_eq!(page.content(Anchor::CartCount), Some("2"));
        assert_eq!(page.content(Anchor::CartTotal), Some("\u{20b9}900.00"));
    }
}
