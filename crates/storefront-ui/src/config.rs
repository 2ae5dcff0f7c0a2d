//! Storefront configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::StorageKeys;
use storefront_commerce::PriceFormat;
use storefront_observability::LoggingConfig;

/// Page-wide settings. Every field has a default, so an empty document is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Local storage keys for the cart and the checkout handoff.
    #[serde(default)]
    pub storage: StorageKeys,

    /// Relative URL of the checkout page.
    #[serde(default = "default_checkout_url")]
    pub checkout_url: String,

    /// Toast and cart icon timings.
    #[serde(default)]
    pub toast: ToastConfig,

    /// Price display locale.
    #[serde(default)]
    pub price: PriceFormat,

    /// Reload the cart when another tab writes it.
    #[serde(default = "default_true")]
    pub sync_across_tabs: bool,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_checkout_url() -> String {
    "shop-checkout.html".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage: StorageKeys::default(),
            checkout_url: default_checkout_url(),
            toast: ToastConfig::default(),
            price: PriceFormat::default(),
            sync_across_tabs: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load config from a file; `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            Self::from_toml_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse JSON config, e.g. from an inline `<script type="application/json">`.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Transient notice timings, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastConfig {
    /// Delay before a toast is shown.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u32,

    /// Time until a toast is hidden again, counted from when it was raised.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u32,

    /// How long the cart icon stays highlighted after an add.
    #[serde(default = "default_pulse_ms")]
    pub pulse_ms: u32,
}

fn default_delay_ms() -> u32 {
    100
}

fn default_duration_ms() -> u32 {
    3000
}

fn default_pulse_ms() -> u32 {
    500
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            duration_ms: default_duration_ms(),
            pulse_ms: default_pulse_ms(),
        }
    }
}
