//! Type-safe key-value persistence for the storefront.
//!
//! Provides a small, ergonomic API for keeping JSON blobs in a string-valued
//! key-value store. In the browser the store is `window.localStorage`; native
//! builds and tests use [`MemoryStore`].
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::{Cache, MemoryStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Line {
//!     id: String,
//!     quantity: i64,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("cart", &vec![Line { id: "A".into(), quantity: 2 }]).unwrap();
//!
//! let lines: Option<Vec<Line>> = cache.get("cart").unwrap();
//! assert_eq!(lines.unwrap()[0].quantity, 2);
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{KeyValueStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use store::LocalStorage;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KeyValueStore, MemoryStore};
}
