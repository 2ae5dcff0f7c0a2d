//! String-backed identifiers.
//!
//! Both serialize as plain JSON strings so persisted carts stay readable by
//! the checkout page. Numeric ids are accepted on input and kept as their
//! decimal text.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(#[serde(deserialize_with = "string_or_number")] String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mint an id from the clock.
            pub fn generate() -> Self {
                Self(generate_id())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Key of a cart line; the product container's `data-id`.
    ItemId
);
string_id!(
    /// Key of a catalog listing.
    ProductId
);

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Signed(i64),
        Unsigned(u64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Signed(n) => n.to_string(),
        Raw::Unsigned(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}

/// Epoch milliseconds. Every id after the first carries a counter suffix so
/// ids minted within the same millisecond stay distinct.
fn generate_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let millis = crate::now_millis();
    match COUNTER.fetch_add(1, Ordering::Relaxed) {
        0 => millis.to_string(),
        n => format!("{}-{}", millis, n),
    }
}
