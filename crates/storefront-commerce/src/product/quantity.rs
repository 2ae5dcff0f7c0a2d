//! Quantity selector.

use crate::money::leading_number;

/// Selected quantity, never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantitySelector {
    value: u32,
}

impl Default for QuantitySelector {
    fn default() -> Self {
        Self { value: 1 }
    }
}

impl QuantitySelector {
    pub fn new(value: u32) -> Self {
        Self { value: value.max(1) }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn increment(&mut self) {
        self.value = self.value.saturating_add(1);
    }

    /// Step down, but never below 1. Returns whether the value changed.
    pub fn decrement(&mut self) -> bool {
        if self.value > 1 {
            self.value -= 1;
            true
        } else {
            false
        }
    }

    /// Apply typed input. Values below 1 and unparseable text become 1;
    /// fractional input is truncated.
    pub fn set_input(&mut self, text: &str) -> u32 {
        self.value = parse_quantity(text);
        self.value
    }
}

/// Integer-prefix parse of quantity text, clamped to at least 1.
pub fn parse_quantity(text: &str) -> u32 {
    match leading_number(text.trim()) {
        Some(n) if n >= 1.0 => n.trunc().min(u32::MAX as f64) as u32,
        _ => 1,
    }
}
