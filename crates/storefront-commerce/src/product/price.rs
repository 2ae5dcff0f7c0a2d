//! Base price cached on the product page's amount element.

use crate::money::{leading_number, PriceFormat};

/// Canonical unit price, used to recompute the displayed price when the
/// quantity changes without re-parsing display text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasePrice {
    value: f64,
}

impl BasePrice {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    /// Establish the base price of an amount element.
    ///
    /// An existing `data-base-price` attribute wins. Otherwise the displayed
    /// text is parsed with `format` when one is supplied, or with a plain
    /// strip-and-parse when not. Returns `None` when nothing parses.
    pub fn establish(
        attribute: Option<&str>,
        displayed: &str,
        format: Option<&PriceFormat>,
    ) -> Option<Self> {
        if let Some(raw) = attribute {
            return match leading_number(raw.trim()) {
                Some(value) => Some(Self::new(value)),
                None => {
                    tracing::error!(attribute = raw, "invalid base price");
                    None
                }
            };
        }

        let value = match format {
            Some(format) => Some(format.parse(displayed)),
            None => inline_parse(displayed),
        };
        value.map(Self::new)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Attribute text for `data-base-price`.
    pub fn attribute(&self) -> String {
        self.value.to_string()
    }

    /// Price for `quantity` units.
    pub fn total(&self, quantity: u32) -> f64 {
        self.value * f64::from(quantity)
    }

    /// Display text for `quantity` units.
    pub fn display(&self, quantity: u32, format: Option<&PriceFormat>) -> String {
        match format {
            Some(format) => format.format(self.total(quantity)),
            None => PriceFormat::default().format(self.total(quantity)),
        }
    }
}

fn inline_parse(text: &str) -> Option<f64> {
    let stripped: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '\u{20b9}')
        .collect();
    leading_number(&stripped)
}
