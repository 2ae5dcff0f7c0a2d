//! Logging for the storefront.
//!
//! All crates log through `tracing` macros; this crate installs the
//! subscriber once at startup. In the browser, output goes to the developer
//! console with the matching console method per level.

mod error;
mod logging;

#[cfg(target_arch = "wasm32")]
mod console;

pub use error::ObservabilityError;
pub use logging::{init, LogFormat, LogLevel, LoggingConfig};

#[cfg(target_arch = "wasm32")]
pub use console::{ConsoleMakeWriter, ConsoleWriter};
