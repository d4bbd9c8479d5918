//! Error types for price_tracker
//!
//! Price lookups and email delivery fail in different ways on purpose:
//! a [`FetchError`] is swallowed by the fetcher and the current poll is
//! skipped, while a [`NotifyError`] always reaches the caller.

use thiserror::Error;

/// Missing or malformed process configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not found.")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
    #[error("unknown price provider: {0}")]
    UnknownProvider(String),
}

/// A single price lookup that produced no usable price
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Upstream answered with a non-2xx status
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Body was not valid JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// JSON had no price at the configured location (or the offer list was empty)
    #[error("no price at {0}")]
    MissingPrice(String),
}

/// Email delivery failure
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid email address {address:?}: {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },
    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Bad interactive or command-line input
#[derive(Debug, Error)]
pub enum InputError {
    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a number: {0:?}")]
    NotANumber(String),
    #[error("drop percentage must be a positive number, got {0}")]
    InvalidDrop(f64),
    #[error("check interval must be at least one second")]
    ZeroInterval,
}

/// Unified error type for a tracker run
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Input error: {0}")]
    Input(#[from] InputError),
    #[error("Notification failed: {0}")]
    Notify(#[from] NotifyError),
}

/// Result alias for price_tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
