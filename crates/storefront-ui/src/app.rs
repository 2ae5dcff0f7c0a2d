//! Composition root.

use storefront_cache::KeyValueStore;
use storefront_commerce::catalog::Product;

use crate::cart_view::{CartHandle, CartManager};
use crate::catalog_view::CatalogController;
use crate::config::StorefrontConfig;
use crate::page::{Action, Anchor, Page, UiEvent};
use crate::product_view::ProductPageController;

/// One page's controllers, wired to a single cart.
#[derive(Debug)]
pub struct Storefront<S> {
    config: StorefrontConfig,
    cart: CartHandle<S>,
    catalog: CatalogController<S>,
    product: Option<ProductPageController<S>>,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Load the cart from `store` and build the controllers around it.
    pub fn new(store: S, config: StorefrontConfig) -> Self {
        let cart = CartManager::load(store, &config).into_handle();
        let catalog = CatalogController::new(cart.clone());
        Self {
            config,
            cart,
            catalog,
            product: None,
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// The shared cart.
    pub fn cart(&self) -> CartHandle<S> {
        self.cart.clone()
    }

    pub fn catalog(&self) -> &CatalogController<S> {
        &self.catalog
    }

    pub fn product(&self) -> Option<&ProductPageController<S>> {
        self.product.as_ref()
    }

    /// Subscribe the page's static controls, paint the cart and take over
    /// the product page if there is one.
    ///
    /// The catalog grid keeps its authored markup until products are
    /// loaded.
    pub fn mount(&mut self, page: &mut dyn Page) {
        let mut bindings = CartManager::<S>::static_bindings();
        bindings.extend(CatalogController::<S>::static_bindings());
        page.bind(Anchor::Document, bindings);

        self.cart.borrow().render(page);
        self.product = ProductPageController::mount(self.cart.clone(), page);
        tracing::info!(
            items = self.cart.borrow().service().cart().len(),
            product_page = self.product.is_some(),
            "storefront mounted"
        );
    }

    /// Populate the catalog from outside.
    pub fn load_products(&mut self, products: Vec<Product>, page: &mut dyn Page) {
        self.catalog.load_products(products, page);
    }

    /// Route a fired binding to its controller.
    pub fn dispatch(&mut self, event: &UiEvent, page: &mut dyn Page) {
        tracing::trace!(action = ?event.action, "dispatch");
        match &event.action {
            Action::Cart(action) => self.cart.borrow_mut().handle(action, event, page),
            Action::Catalog(action) => self.catalog.handle(action, event, page),
            Action::Product(action) => match self.product.as_mut() {
                Some(product) => product.handle(action, event, page),
                None => tracing::debug!(action = ?action, "not a product page"),
            },
        }
    }

    /// React to a storage write from another tab. `key` is `None` when the
    /// whole storage was cleared.
    ///
    /// Returns whether the cart changed.
    pub fn storage_changed(&mut self, key: Option<&str>, page: &mut dyn Page) -> bool {
        if !self.config.sync_across_tabs {
            return false;
        }
        if key.is_some_and(|k| k != self.config.storage.cart) {
            return false;
        }
        self.cart.borrow_mut().sync(page)
    }
}
