//! Logging setup errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("invalid log filter '{directive}': {reason}")]
    InvalidFilter { directive: String, reason: String },

    #[error("a global subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}
