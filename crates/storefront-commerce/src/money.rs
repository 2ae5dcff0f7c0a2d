//! Price display and parsing.
//!
//! Prices are plain `f64` amounts in the major currency unit, exactly as they
//! are persisted in the cart. Rounding happens only when an amount is turned
//! into display text.

use serde::{Deserialize, Serialize};

/// The rupee sign.
pub const RUPEE: &str = "\u{20b9}";

/// How the integer part of an amount is grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// Last three digits, then pairs: `1,23,45,678`.
    #[default]
    Indian,
    /// Groups of three: `12,345,678`.
    Thousands,
}

impl Grouping {
    /// Insert `,` separators into a run of ASCII digits.
    pub fn apply(&self, digits: &str) -> String {
        let (head, tail) = match self {
            Grouping::Indian if digits.len() > 3 => digits.split_at(digits.len() - 3),
            Grouping::Thousands if digits.len() > 3 => digits.split_at(digits.len() - 3),
            _ => return digits.to_string(),
        };

        let width = match self {
            Grouping::Indian => 2,
            Grouping::Thousands => 3,
        };

        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(width);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        groups.push(tail);
        groups.join(",")
    }
}

/// The single display locale used across the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceFormat {
    /// Currency glyph placed before the amount.
    pub symbol: String,
    /// Integer grouping convention.
    pub grouping: Grouping,
    /// Fraction digits shown.
    pub decimals: usize,
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self {
            symbol: RUPEE.to_string(),
            grouping: Grouping::Indian,
            decimals: 2,
        }
    }
}

impl PriceFormat {
    /// Format an amount, e.g. `₹1,23,456.00`.
    ///
    /// Non-finite input is logged and rendered as the zero amount.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            tracing::error!(value, "invalid price value");
            return self.zero();
        }

        let fixed = format!("{:.*}", self.decimals, value.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (fixed.as_str(), None),
        };

        let negative = value < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));

        let mut out = String::with_capacity(fixed.len() + self.symbol.len() + 8);
        if negative {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push_str(&self.grouping.apply(int_part));
        if let Some(frac_part) = frac_part {
            out.push('.');
            out.push_str(frac_part);
        }
        out
    }

    /// The zero amount, e.g. `₹0.00`.
    pub fn zero(&self) -> String {
        self.format(0.0)
    }

    /// Best-effort parse of displayed price text.
    ///
    /// Strips the currency glyph, whitespace and `,` separators, then reads
    /// the longest leading decimal number. Returns `None` when no number is
    /// found.
    pub fn try_parse(&self, text: &str) -> Option<f64> {
        let cleaned = self.clean(text);
        let digits: String = cleaned.chars().filter(|c| *c != ',').collect();
        leading_number(&digits)
    }

    /// Like [`try_parse`](Self::try_parse), but logs and yields `0.0` on
    /// failure.
    pub fn parse(&self, text: &str) -> f64 {
        match self.try_parse(text) {
            Some(price) => {
                tracing::debug!(original = text, parsed = price, "parsed price");
                price
            }
            None => {
                tracing::error!(
                    original = text,
                    cleaned = %self.clean(text),
                    "failed to parse price"
                );
                0.0
            }
        }
    }

    fn clean(&self, text: &str) -> String {
        let without_symbol = if self.symbol.is_empty() {
            text.to_string()
        } else {
            text.replace(self.symbol.as_str(), "")
        };
        without_symbol
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }
}

/// Format with the default display locale.
pub fn format_price(value: f64) -> String {
    PriceFormat::default().format(value)
}

/// Parse with the default display locale; `0.0` on failure.
pub fn parse_price(text: &str) -> f64 {
    PriceFormat::default().parse(text)
}

/// Read the longest prefix of `s` that is a decimal number
/// (`[+-]digits[.digits][e[+-]digits]`).
pub(crate) fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || mantissa_digits > 0 {
            mantissa_digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Where a product's price may be displayed, in the order they are tried.
///
/// Price markup differs between listing, detail and promotional contexts, so
/// more than one place is consulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceSources<'a> {
    /// Machine-readable `data-base-price` attribute.
    pub base_price: Option<&'a str>,
    /// Generic displayed amount.
    pub amount: Option<&'a str>,
    /// Sale or special-price displayed amount.
    pub special_amount: Option<&'a str>,
}

impl PriceSources<'_> {
    /// The first source that parses to a positive amount, or `None` when the
    /// price is unavailable.
    pub fn resolve(&self, format: &PriceFormat) -> Option<f64> {
        let base = self.base_price.and_then(|raw| leading_number(raw.trim()));
        let amount = self.amount.and_then(|text| format.try_parse(text));
        let special = self.special_amount.and_then(|text| format.try_parse(text));

        [base, amount, special]
            .into_iter()
            .flatten()
            .find(|price| price.is_finite() && *price > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_indian_grouping() {
        assert_eq!(format_price(123456.0), "\u{20b9}1,23,456.00");
        assert_eq!(format_price(6999.0), "\u{20b9}6,999.00");
        assert_eq!(format_price(12345678.9), "\u{20b9}1,23,45,678.90");
        assert_eq!(format_price(999.5), "\u{20b9}999.50");
        assert_eq!(format_price(0.0), "\u{20b9}0.00");
    }

    #[test]
    fn test_format_thousands_grouping() {
        let format = PriceFormat {
            symbol: "$".to_string(),
            grouping: Grouping::Thousands,
            decimals: 2,
        };
        assert_eq!(format.format(1234567.5), "$1,234,567.50");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_price(-1500.0), "-\u{20b9}1,500.00");
        assert_eq!(format_price(-0.001), "\u{20b9}0.00");
    }

    #[test]
    fn test_format_non_finite_is_zero() {
        assert_eq!(format_price(f64::NAN), "\u{20b9}0.00");
        assert_eq!(format_price(f64::INFINITY), "\u{20b9}0.00");
    }

    #[test]
    fn test_parse_grouped_amounts() {
        assert_eq!(parse_price("\u{20b9}1,23,456.00"), 123456.0);
        assert_eq!(parse_price(" \u{20b9} 6,999.00 "), 6999.0);
        assert_eq!(parse_price("2,499"), 2499.0);
        assert_eq!(parse_price("-\u{20b9}1,500.00"), -1500.0);
    }

    #[test]
    fn test_parse_is_lenient_prefix() {
        assert_eq!(parse_price("\u{20b9}49.99 only"), 49.99);
        assert_eq!(parse_price(".5"), 0.5);
        assert_eq!(parse_price("1e3"), 1000.0);
    }

    #[test]
    fn test_parse_failure_is_zero() {
        assert_eq!(parse_price("Price on request"), 0.0);
        assert_eq!(parse_price(""), 0.0);
        assert_eq!(parse_price("\u{20b9}"), 0.0);
        assert!(PriceFormat::default().try_parse("abc").is_none());
    }

    #[test]
    fn test_roundtrip_is_stable() {
        for text in ["\u{20b9}1,23,456.00", "\u{20b9}0.50", "\u{20b9}99,99,999.99"] {
            assert_eq!(format_price(parse_price(text)), text);
        }
    }

    #[test]
    fn test_price_sources_prefers_base_price() {
        let format = PriceFormat::default();
        let sources = PriceSources {
            base_price: Some("1299.5"),
            amount: Some("\u{20b9}2,599.00"),
            special_amount: None,
        };
        assert_eq!(sources.resolve(&format), Some(1299.5));
    }

    #[test]
    fn test_price_sources_falls_through_unparseable() {
        let format = PriceFormat::default();
        let sources = PriceSources {
            base_price: Some("n/a"),
            amount: Some("Sold out"),
            special_amount: Some("\u{20b9}799.00"),
        };
        assert_eq!(sources.resolve(&format), Some(799.0));
    }

    #[test]
    fn test_price_sources_unavailable() {
        let format = PriceFormat::default();
        let sources = PriceSources {
            base_price: Some("0"),
            amount: None,
            special_amount: Some("free"),
        };
        assert_eq!(sources.resolve(&format), None);
        assert_eq!(PriceSources::default().resolve(&format), None);
    }

    #[test]
    fn test_grouping_short_numbers_untouched() {
        assert_eq!(Grouping::Indian.apply("999"), "999");
        assert_eq!(Grouping::Indian.apply("1000"), "1,000");
        assert_eq!(Grouping::Indian.apply("100000"), "1,00,000");
        assert_eq!(Grouping::Thousands.apply("100000"), "100,000");
    }

    proptest! {
        #[test]
        fn test_format_parse_roundtrip(paise in 0u64..10_000_000_000u64) {
            let amount = paise as f64 / 100.0;
            let text = format_price(amount);
            prop_assert!((parse_price(&text) - amount).abs() < 0.005);
            prop_assert_eq!(format_price(parse_price(&text)), text);
        }
    }
}
