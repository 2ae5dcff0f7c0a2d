//! Cart line items.

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::ItemId;
use crate::product::parse_quantity;

/// A line item: one product id with a quantity and optional variant
/// selections.
///
/// Field names match the persisted `cart` JSON array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Identifier, unique within the cart.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Unit price in the major currency unit.
    pub price: f64,
    /// Image URL.
    pub image: String,
    /// Quantity, at least 1 once the item is in a cart. Missing, null or
    /// non-numeric values read as 1.
    #[serde(default = "default_quantity", deserialize_with = "lenient_quantity")]
    pub quantity: i64,
    /// Selected variant attributes (e.g. `color`, `size`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, String>>,
}

fn default_quantity() -> i64 {
    1
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Whole(i64),
        Fraction(f64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Whole(n)) => n,
        Some(Raw::Fraction(n)) if n.is_finite() => n.trunc() as i64,
        Some(Raw::Text(text)) => i64::from(parse_quantity(&text)),
        _ => default_quantity(),
    })
}

impl CartItem {
    /// Create an item with quantity 1 and no options.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
            quantity: 1,
            options: None,
        }
    }

    /// Set the offered quantity.
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Record a variant selection.
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Price times quantity.
    pub fn subtotal(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
