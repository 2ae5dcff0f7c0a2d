//! String-valued key-value stores.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::CacheError;

/// A string-valued key-value store.
///
/// Writes replace the whole value under a key; there are no partial updates
/// and no transactions. The storefront runs on a single thread, so
/// implementations take `&self` and use interior mutability.
pub trait KeyValueStore {
    /// Read the raw value under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Replace the raw value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// In-memory store.
///
/// Clones share the same entries, which is how two views of one origin's
/// storage (e.g. two tabs) are modelled in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with raw entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        store
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// The browser's `window.localStorage`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// Open the origin's local storage.
    pub fn open() -> Result<Self, CacheError> {
        let window =
            web_sys::window().ok_or_else(|| CacheError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| CacheError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| CacheError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.storage
            .get_item(key)
            .map_err(|e| CacheError::Store(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| CacheError::Store(format!("{:?}", e)))
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.storage
            .remove_item(key)
            .map_err(|e| CacheError::Store(format!("{:?}", e)))
    }
}
