//! Typed wrapper with automatic JSON serialization.

use serde::{de::DeserializeOwned, Serialize};

use crate::{CacheError, KeyValueStore};

/// Type-safe cache over a [`KeyValueStore`].
///
/// Values are stored as JSON text, so anything implementing `Serialize` and
/// `DeserializeOwned` can be kept under a key.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: KeyValueStore> Cache<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and
    /// [`CacheError::Serialization`] if the stored text is not a valid `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(text) => {
                let value: T = serde_json::from_str(&text)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache, replacing whatever was there.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let text = serde_json::to_string(value)?;
        self.store.set(key, &text)?;
        tracing::trace!(key, bytes = text.len(), "cache write");
        Ok(())
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.store.get(key)?.is_some())
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: String,
        quantity: i64,
    }

    #[test]
    fn test_get_missing_key() {
        let cache = Cache::new(MemoryStore::new());
        let value: Option<Vec<Entry>> = cache.get("cart").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_set_then_get() {
        let cache = Cache::new(MemoryStore::new());
        let entries = vec![Entry {
            id: "A".to_string(),
            quantity: 3,
        }];
        cache.set("cart", &entries).unwrap();

        let loaded: Vec<Entry> = cache.get("cart").unwrap().unwrap();
        assert_eq!(loaded, entries);
        assert!(cache.exists("cart").unwrap());
    }

    #[test]
    fn test_unparseable_value_is_serialization_error() {
        let store = MemoryStore::with_entries([("cart", "{not json")]);
        let cache = Cache::new(store);

        let result: Result<Option<Vec<Entry>>, _> = cache.get("cart");
        assert!(matches!(result, Err(CacheError::Serialization(_))));
    }

    #[test]
    fn test_stored_text_is_json() {
        let store = MemoryStore::new();
        let cache = Cache::new(store.clone());
        cache.set("n", &42).unwrap();
        assert_eq!(store.get("n").unwrap().as_deref(), Some("42"));
    }
}
