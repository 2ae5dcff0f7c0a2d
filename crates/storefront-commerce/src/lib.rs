//! Storefront domain types and logic.
//!
//! This crate holds everything the storefront pages compute, independent of
//! any DOM:
//!
//! - **Cart**: line items, totals, persistence and checkout handoff
//! - **Catalog**: product list with price/category filters and sorting
//! - **Product page**: quantity, variant options, gallery and price display
//! - **Money**: price formatting and best-effort parsing
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::MemoryStore;
//! use storefront_commerce::prelude::*;
//!
//! let mut cart = CartService::load(MemoryStore::new(), StorageKeys::default());
//! cart.add_item(CartItem::new("A", "Kurta", 100.0, "/img/kurta.jpg"));
//! cart.add_item(CartItem::new("A", "Kurta", 100.0, "/img/kurta.jpg").with_quantity(2));
//!
//! assert_eq!(cart.cart().len(), 1);
//! assert_eq!(cart.calculate_total(), 300.0);
//! assert_eq!(format_price(cart.calculate_total()), "\u{20b9}300.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod product;

pub use error::CommerceError;
pub use ids::*;
pub use money::{format_price, parse_price, Grouping, PriceFormat, PriceSources};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{format_price, parse_price, Grouping, PriceFormat, PriceSources};

    // Cart
    pub use crate::cart::{Cart, CartItem, CartService, StorageKeys};

    // Checkout
    pub use crate::checkout::CheckoutPayload;

    // Catalog
    pub use crate::catalog::{Catalog, PriceRange, Product, SortKey, ViewMode};

    // Product page
    pub use crate::product::{
        BasePrice, Gallery, OptionGroup, ProductDetails, ProductPageState, QuantitySelector,
    };
}

/// Current time as epoch milliseconds.
pub fn now_millis() -> i64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as i64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        chrono::Utc::now().timestamp_millis()
    }
}
