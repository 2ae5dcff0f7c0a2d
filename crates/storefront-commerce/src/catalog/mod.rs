//! Product catalog module.
//!
//! Contains the listing product type, price/category filters, sort keys and
//! the catalog holding the full and derived product lists.

mod catalog;
mod filter;
mod product;
mod sort;

pub use catalog::{Catalog, ViewMode};
pub use filter::PriceRange;
pub use product::Product;
pub use sort::SortKey;
