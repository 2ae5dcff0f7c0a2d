//! Catalog sort orders.

use std::cmp::Ordering;

use crate::catalog::Product;

/// Sort order selected in the catalog's ordering control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    PriceLowToHigh,
    PriceHighToLow,
    /// Most popular first.
    Popularity,
    /// Newest first; undated products last.
    Date,
    /// Best rated first.
    Rating,
    /// Alphabetical by name.
    #[default]
    Name,
}

impl SortKey {
    /// The control value for this order.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PriceLowToHigh => "price-low-to-high",
            SortKey::PriceHighToLow => "price-high-to-low",
            SortKey::Popularity => "by-popularity",
            SortKey::Date => "date",
            SortKey::Rating => "rating",
            SortKey::Name => "default",
        }
    }

    /// Map a control value to an order. Unknown values sort by name.
    pub fn from_value(value: &str) -> Self {
        match value {
            "price-low-to-high" => SortKey::PriceLowToHigh,
            "price-high-to-low" => SortKey::PriceHighToLow,
            "by-popularity" => SortKey::Popularity,
            "date" => SortKey::Date,
            "rating" => SortKey::Rating,
            _ => SortKey::Name,
        }
    }

    /// Compare two products under this order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::PriceLowToHigh => a.price.total_cmp(&b.price),
            SortKey::PriceHighToLow => b.price.total_cmp(&a.price),
            SortKey::Popularity => b.popularity.total_cmp(&a.popularity),
            SortKey::Rating => b.rating.total_cmp(&a.rating),
            SortKey::Date => match (a.listed_at(), b.listed_at()) {
                (Some(a), Some(b)) => b.cmp(&a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortKey::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
        }
    }
}
