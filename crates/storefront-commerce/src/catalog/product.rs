//! Listing product type.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::ProductId;

/// A product as shown in the catalog grid.
///
/// Read-only within the storefront; the list is populated from outside.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Current price in the major currency unit.
    pub price: f64,
    pub category: String,
    /// Image URL.
    pub image: String,
    #[serde(default)]
    pub popularity: f64,
    /// Listing date, RFC 3339 or `YYYY-MM-DD`. Epoch milliseconds are
    /// accepted on input and stored as RFC 3339.
    #[serde(default, deserialize_with = "date_text")]
    pub date: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub on_sale: bool,
    /// Price before the sale, shown struck through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<f64>,
}

impl Product {
    /// Create a product with neutral popularity, rating and date.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        category: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: category.into(),
            image: image.into(),
            popularity: 0.0,
            date: String::new(),
            rating: 0.0,
            on_sale: false,
            old_price: None,
        }
    }

    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = popularity;
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Mark as on sale, optionally with the pre-sale price.
    pub fn on_sale(mut self, old_price: Option<f64>) -> Self {
        self.on_sale = true;
        self.old_price = old_price;
        self
    }

    /// The listing date, if it parses.
    pub fn listed_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.date.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Some(Utc.from_utc_datetime(&naive));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    }
}

fn date_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Millis(i64),
        Fraction(f64),
    }

    let millis = match Option::<Raw>::deserialize(deserializer)? {
        None => return Ok(String::new()),
        Some(Raw::Text(s)) => return Ok(s),
        Some(Raw::Millis(n)) => Some(n),
        Some(Raw::Fraction(n)) if n.is_finite() => Some(n as i64),
        Some(Raw::Fraction(_)) => None,
    };
    Ok(millis
        .and_then(|n| Utc.timestamp_millis_opt(n).single())
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default())
}
