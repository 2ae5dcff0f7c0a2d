//! Checkout handoff.

use serde::{Deserialize, Serialize};

use crate::cart::CartItem;

/// Snapshot of the cart handed to the external checkout page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutPayload {
    /// Line items at the time checkout started.
    pub items: Vec<CartItem>,
    /// Cart total at the time checkout started.
    pub total: f64,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl CheckoutPayload {
    pub fn new(items: Vec<CartItem>, total: f64, timestamp: i64) -> Self {
        Self {
            items,
            total,
            timestamp,
        }
    }

    /// Total number of units in the snapshot.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |n, i| n.saturating_add(i.quantity))
    }
}
