//! Shopping cart module.
//!
//! Contains the line item type, the pure cart state and the persisted cart
//! service.

mod cart;
mod item;
mod service;

pub use cart::Cart;
pub use item::CartItem;
pub use service::{CartService, StorageKeys};
