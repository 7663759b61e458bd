//! Core error type.
//!
//! Configuration problems are detected here, before any run starts.  Sub-crates
//! wrap `CoreError` as one variant of their own error enums.

use thiserror::Error;

/// The top-level error type for `ts-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {what} probability {value} for class {class:?}")]
    InvalidProbability {
        what:  &'static str,
        class: String,
        value: f64,
    },

    #[error("invalid tick horizon {0}: must be >= 0")]
    InvalidHorizon(i64),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `ts-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
