//! Single-product page state.
//!
//! Quantity, variant option groups, gallery selection and the cached base
//! price. Nothing here is persisted; the state lives as long as the page.

mod gallery;
mod options;
mod price;
mod quantity;
mod state;

pub use gallery::Gallery;
pub use options::OptionGroup;
pub use price::BasePrice;
pub use quantity::{parse_quantity, QuantitySelector};
pub use state::{ProductDetails, ProductPageState, UNNAMED_PRODUCT};
