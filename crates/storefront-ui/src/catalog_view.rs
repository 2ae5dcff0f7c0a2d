//! Catalog controller.

use storefront_cache::KeyValueStore;
use storefront_commerce::cart::CartItem;
use storefront_commerce::catalog::{Catalog, PriceRange, Product, SortKey, ViewMode};
use storefront_commerce::{ItemId, PriceFormat, ProductId};

use crate::cart_view::CartHandle;
use crate::page::{Action, Anchor, Binding, CatalogAction, Page, UiEvent};
use crate::sections::{render_product_grid, render_result_count};

/// Filters, sorts and repaints the product grid.
///
/// Filters and sorts do not compose: a filter rebuilds the view from the
/// full list in list order, and a sort reorders whatever the view holds.
#[derive(Debug)]
pub struct CatalogController<S> {
    catalog: Catalog,
    view_mode: ViewMode,
    format: PriceFormat,
    cart: CartHandle<S>,
}

impl<S: KeyValueStore> CatalogController<S> {
    pub fn new(cart: CartHandle<S>) -> Self {
        let format = cart.borrow().format().clone();
        Self {
            catalog: Catalog::new(),
            view_mode: ViewMode::default(),
            format,
            cart,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Populate the catalog and show every product.
    pub fn load_products(&mut self, products: Vec<Product>, page: &mut dyn Page) {
        self.catalog.set_products(products);
        self.render(page);
    }

    pub fn filter_by_price(&mut self, range: PriceRange, page: &mut dyn Page) {
        self.catalog.filter_by_range(range);
        self.render(page);
    }

    pub fn filter_by_category(&mut self, category: &str, page: &mut dyn Page) {
        self.catalog.filter_by_category(category);
        self.render(page);
    }

    pub fn filter_by_categories(&mut self, categories: &[String], page: &mut dyn Page) {
        self.catalog.filter_by_categories(categories);
        self.render(page);
    }

    pub fn sort_products(&mut self, key: SortKey, page: &mut dyn Page) {
        self.catalog.sort_products(key);
        self.render(page);
    }

    pub fn set_view_mode(&mut self, mode: ViewMode, page: &mut dyn Page) {
        self.view_mode = mode;
        page.set_view_mode(mode);
    }

    /// Add a listed product to the cart.
    pub fn add_to_cart(&self, id: &ProductId, page: &mut dyn Page) {
        let Some(product) = self.catalog.products().iter().find(|p| &p.id == id) else {
            tracing::error!(product = %id, "product not in catalog");
            return;
        };
        if !product.price.is_finite() || product.price <= 0.0 {
            tracing::error!(product = %id, price = product.price, "invalid price");
            return;
        }

        let item = CartItem::new(
            ItemId::new(product.id.as_str()),
            product.name.as_str(),
            product.price,
            product.image.as_str(),
        );
        self.cart.borrow_mut().add_with_notice(item, page);
    }

    /// Repaint the grid and the result count. Nothing is painted on pages
    /// without a grid.
    pub fn render(&self, page: &mut dyn Page) {
        let shown = self.catalog.filtered();
        if !page.show(Anchor::ProductGrid, render_product_grid(shown, &self.format)) {
            return;
        }
        page.set_text(
            Anchor::ResultCount,
            &render_result_count(shown.len(), self.catalog.products().len()),
        );
    }

    /// Subscriptions for the filter, sort and view controls authored into
    /// the page.
    pub fn static_bindings() -> Vec<Binding> {
        vec![
            Binding::change(".price-range", Action::Catalog(CatalogAction::PriceRange)),
            Binding::change(".price-filter input", Action::Catalog(CatalogAction::PriceInputs)),
            Binding::click(
                ".product-categories a[data-category]",
                Action::Catalog(CatalogAction::Category),
            )
            .value_from("data-category"),
            Binding::change(
                r#".widget_categories input[type="checkbox"]"#,
                Action::Catalog(CatalogAction::Categories),
            ),
            Binding::change(".ecommerce-ordering select", Action::Catalog(CatalogAction::Sort)),
            Binding::click("#grid", Action::Catalog(CatalogAction::ViewMode(ViewMode::Grid))),
            Binding::click("#list", Action::Catalog(CatalogAction::ViewMode(ViewMode::List))),
        ]
    }

    pub fn handle(&mut self, action: &CatalogAction, event: &UiEvent, page: &mut dyn Page) {
        match action {
            CatalogAction::PriceRange => {
                match event.value.as_deref().and_then(PriceRange::parse) {
                    Some(range) => self.filter_by_price(range, page),
                    None => tracing::warn!(value = ?event.value, "unreadable price range"),
                }
            }
            CatalogAction::PriceInputs => {
                let (min, max) = page.price_inputs();
                match PriceRange::from_inputs(&min, &max) {
                    Some(range) => self.filter_by_price(range, page),
                    None => tracing::warn!(min = %min, max = %max, "unreadable price inputs"),
                }
            }
            CatalogAction::Category => match event.value.as_deref() {
                Some(category) => self.filter_by_category(category, page),
                None => tracing::warn!("category link without a category"),
            },
            CatalogAction::Categories => {
                let categories = page.checked_categories();
                self.filter_by_categories(&categories, page);
            }
            CatalogAction::Sort => {
                let key = SortKey::from_value(event.value.as_deref().unwrap_or_default());
                self.sort_products(key, page);
            }
            CatalogAction::ViewMode(mode) => self.set_view_mode(*mode, page),
            CatalogAction::AddToCart(id) => self.add_to_cart(id, page),
        }
    }
}
