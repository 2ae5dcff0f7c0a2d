//! Catalog state: the full product list and its derived view.

use crate::catalog::{PriceRange, Product, SortKey};

/// How the product grid is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    /// Class applied to the catalogue container.
    pub fn container_class(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid-view",
            ViewMode::List => "list-view",
        }
    }

    /// Class applied to the active switch.
    pub fn active_class(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid-active",
            ViewMode::List => "list-active",
        }
    }

    /// Id of the switch element that selects this mode.
    pub fn switch_id(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

/// Product list plus the filtered/sorted view shown in the grid.
///
/// Every filter recomputes the view from the full list, and sorting reorders
/// the current view. A filter does not reapply the last sort, and a sort does
/// not reapply the last filter.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    filtered: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog showing all of `products`.
    pub fn with_products(products: Vec<Product>) -> Self {
        let mut catalog = Self::new();
        catalog.set_products(products);
        catalog
    }

    /// Replace the product list; the view resets to every product.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.filtered = products.clone();
        self.products = products;
        tracing::debug!(products = self.products.len(), "catalog populated");
    }

    /// The full product list.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The derived view.
    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    /// Keep products priced within `[min, max]`.
    pub fn filter_by_price(&mut self, min: f64, max: f64) {
        self.filter_by_range(PriceRange::new(min, max));
    }

    /// Keep products priced within `range`.
    pub fn filter_by_range(&mut self, range: PriceRange) {
        self.refilter(|p| range.contains(p.price));
    }

    /// Keep products in `category`; `"all"` keeps everything.
    pub fn filter_by_category(&mut self, category: &str) {
        if category == "all" {
            self.refilter(|_| true);
        } else {
            self.refilter(|p| p.category == category);
        }
    }

    /// Keep products in any of `categories`; an empty selection keeps
    /// everything.
    pub fn filter_by_categories<C: AsRef<str>>(&mut self, categories: &[C]) {
        if categories.is_empty() {
            self.refilter(|_| true);
        } else {
            self.refilter(|p| categories.iter().any(|c| c.as_ref() == p.category));
        }
    }

    /// Reorder the current view. The sort is stable.
    pub fn sort_products(&mut self, key: SortKey) {
        self.filtered.sort_by(|a, b| key.compare(a, b));
    }

    fn refilter(&mut self, keep: impl Fn(&Product) -> bool) {
        self.filtered = self.products.iter().filter(|p| keep(p)).cloned().collect();
        tracing::debug!(shown = self.filtered.len(), total = self.products.len(), "catalog filtered");
    }
}
