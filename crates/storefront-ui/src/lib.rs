//! Storefront page controllers.
//!
//! Three controllers share one cart:
//!
//! - [`CartManager`]: repaints the nav mini-cart, the cart table and totals
//!   after every mutation, and hands the cart to checkout
//! - [`CatalogController`]: filters, sorts and repaints the product grid
//! - [`ProductPageController`]: quantity, variant and gallery state of a
//!   single-product page
//!
//! Markup is computed by pure renderers in [`sections`] and applied through
//! the [`Page`] trait. [`MemoryPage`] implements it in memory; on wasm32 the
//! `browser` module implements it over the live DOM.
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::MemoryStore;
//! use storefront_commerce::prelude::*;
//! use storefront_ui::{Anchor, MemoryPage, Storefront, StorefrontConfig};
//!
//! let mut page = MemoryPage::cart_page();
//! let mut app = Storefront::new(MemoryStore::new(), StorefrontConfig::default());
//! app.mount(&mut page);
//!
//! app.cart()
//!     .borrow_mut()
//!     .add_item(CartItem::new("A", "Kurta", 100.0, "/a.jpg"), &mut page);
//! assert_eq!(page.content(Anchor::CartCount), Some("1"));
//! assert_eq!(page.content(Anchor::CartTotal), Some("\u{20b9}100.00"));
//! ```

pub mod config;
pub mod page;
pub mod sections;

mod app;
mod cart_view;
mod catalog_view;
mod memory;
mod product_view;

#[cfg(any(target_arch = "wasm32", test))]
mod listeners;

#[cfg(target_arch = "wasm32")]
mod browser;

pub use app::Storefront;
pub use cart_view::{CartHandle, CartManager, ADD_SUCCESS_MESSAGE};
pub use catalog_view::CatalogController;
pub use config::{StorefrontConfig, ToastConfig};
pub use memory::MemoryPage;
pub use page::{
    Action, Anchor, Binding, CartAction, CatalogAction, EventKind, GalleryView, Notice, NoticeKind, Page,
    ProductAction, ProductContainer, ProductPageLayout, ProductPageView, Rendered, UiEvent,
};
pub use product_view::ProductPageController;
