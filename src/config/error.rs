//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Retry attempt ceiling must be at least 1")]
    ZeroAttempts,

    #[error("Backoff schedule must cover every retry (need at least max_attempts - 1 delays)")]
    BackoffScheduleTooShort,

    #[error("Surcharge markups cannot be negative")]
    NegativeMarkup,

    #[error("Invalid Mollie API key format")]
    InvalidMollieKey,

    #[error("Invalid Mollie base URL")]
    InvalidMollieBaseUrl,
}
