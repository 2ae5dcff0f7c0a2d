//! Catalog filters.

use serde::{Deserialize, Serialize};

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Parse the `"min,max"` value of a range control.
    pub fn parse(value: &str) -> Option<Self> {
        let (min, max) = value.split_once(',')?;
        Some(Self::new(
            min.trim().parse().ok()?,
            max.trim().parse().ok()?,
        ))
    }

    /// Build from separate min/max inputs. An empty min means 0 and an empty
    /// max means unbounded; anything else must be a number.
    pub fn from_inputs(min: &str, max: &str) -> Option<Self> {
        let min = match min.trim() {
            "" => 0.0,
            text => text.parse().ok()?,
        };
        let max = match max.trim() {
            "" => f64::INFINITY,
            text => text.parse().ok()?,
        };
        Some(Self::new(min, max))
    }

    /// Whether `price` lies within the bounds.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_value() {
        assert_eq!(PriceRange::parse("100,500"), Some(PriceRange::new(100.0, 500.0)));
        assert_eq!(PriceRange::parse(" 0 , 99.5 "), Some(PriceRange::new(0.0, 99.5)));
        assert_eq!(PriceRange::parse("100"), None);
        assert_eq!(PriceRange::parse("a,b"), None);
    }

    #[test]
    fn test_from_inputs() {
        let range = PriceRange::from_inputs("", "").unwrap();
        assert!(range.contains(0.0));
        assert!(range.contains(1e9));
        assert_eq!(PriceRange::from_inputs("10", "x"), None);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = PriceRange::new(10.0, 20.0);
        assert!(range.contains(10.0));
        assert!(range.contains(20.0));
        assert!(!range.contains(20.01));
        assert!(!range.contains(f64::NAN));
    }
}
