//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backing store could not be reached.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A store operation failed.
    #[error("Store operation failed: {0}")]
    Store(String),
}
