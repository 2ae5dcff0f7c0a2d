//! Subscriber configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt as fmt_layer, EnvFilter};

use crate::ObservabilityError;

/// Minimum level that is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Filter directive for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "TRACE"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Human-readable lines (for development).
    #[default]
    Human,
}

/// Logging section of the storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level when no explicit filter is given.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Full filter directive (e.g. `storefront_ui=debug,info`). Takes
    /// precedence over `RUST_LOG` and `level`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl LoggingConfig {
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Build the event filter: explicit directive, then `RUST_LOG`, then
    /// the configured level.
    pub fn env_filter(&self) -> Result<EnvFilter, ObservabilityError> {
        if let Some(directive) = &self.filter {
            return parse_filter(directive);
        }
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => parse_filter(self.level.as_str()),
        }
    }
}

fn parse_filter(directive: &str) -> Result<EnvFilter, ObservabilityError> {
    EnvFilter::try_new(directive).map_err(|e| ObservabilityError::InvalidFilter {
        directive: directive.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber.
///
/// Fails if the filter does not parse or a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), ObservabilityError> {
    let filter = config.env_filter()?;
    install(filter, config.format)
        .map_err(|e| ObservabilityError::AlreadyInitialized(e.to_string()))?;
    tracing::debug!(level = %config.level, format = ?config.format, "logging initialized");
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn install(filter: EnvFilter, format: LogFormat) -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt_layer::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Human => registry
            .with(fmt_layer::layer().with_writer(std::io::stderr))
            .try_init(),
    }
}

// No wall clock on wasm32-unknown-unknown; the console stamps entries itself.
#[cfg(target_arch = "wasm32")]
fn install(filter: EnvFilter, format: LogFormat) -> Result<(), TryInitError> {
    use crate::console::ConsoleMakeWriter;

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(
                fmt_layer::layer()
                    .json()
                    .without_time()
                    .with_writer(ConsoleMakeWriter),
            )
            .try_init(),
        LogFormat::Human => registry
            .with(
                fmt_layer::layer()
                    .without_time()
                    .with_ansi(false)
                    .with_writer(ConsoleMakeWriter),
            )
            .try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
        assert_eq!("Warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_config_deserialize() {
        let config: LoggingConfig =
            serde_json::from_str(r#"{"level":"debug","format":"json"}"#).unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.filter.is_none());

        let empty: LoggingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, LoggingConfig::default());
    }

    #[test]
    fn test_invalid_filter() {
        let config = LoggingConfig::default().with_filter("storefront_ui=loud");
        match config.env_filter() {
            Err(ObservabilityError::InvalidFilter { directive, .. }) => {
                assert_eq!(directive, "storefront_ui=loud");
            }
            other => panic!("expected invalid filter, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_init_twice_fails() {
        let config = LoggingConfig::default().with_filter("warn");
        let _ = init(&config);
        assert!(matches!(
            init(&config),
            Err(ObservabilityError::AlreadyInitialized(_))
        ));
    }
}
