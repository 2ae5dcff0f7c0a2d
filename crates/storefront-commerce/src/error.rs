//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// The `Display` text of the checkout variants is shown to the shopper as-is.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Checkout attempted with no items.
    #[error("Your cart is empty. Please add items before checkout.")]
    EmptyCart,

    /// Checkout attempted with a total that is not positive.
    #[error("Invalid cart total. Please try again.")]
    InvalidTotal(f64),

    /// Persistence failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CommerceError {
    /// Whether this error is a business-rule violation meant for the shopper
    /// rather than a diagnostic.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, CommerceError::EmptyCart | CommerceError::InvalidTotal(_))
    }
}

impl From<storefront_cache::CacheError> for CommerceError {
    fn from(e: storefront_cache::CacheError) -> Self {
        CommerceError::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_cache::CacheError;

    #[test]
    fn test_cache_failures_are_storage_errors() {
        let err = CommerceError::from(CacheError::Store("quota exceeded".to_string()));
        assert!(matches!(err, CommerceError::Storage(_)));
        assert!(!err.is_user_facing());
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn test_checkout_errors_are_user_facing() {
        assert!(CommerceError::EmptyCart.is_user_facing());
        assert!(CommerceError::InvalidTotal(0.0).is_user_facing());
    }
}
