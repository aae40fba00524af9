//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `CLUBBILL` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use clubbill::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod billing;
mod error;
mod mollie;
mod retry;

pub use billing::BillingConfig;
pub use error::{ConfigError, ValidationError};
pub use mollie::MollieConfig;
pub use retry::{RetryConfig, DEFAULT_BACKOFF_SECS, DEFAULT_MAX_ATTEMPTS};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the billing core. Load using
/// [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Billing configuration (surcharge policy)
    #[serde(default)]
    pub billing: BillingConfig,

    /// Retry configuration (mandate submission)
    #[serde(default)]
    pub retry: RetryConfig,

    /// Payment processor configuration (Mollie)
    pub mollie: MollieConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `CLUBBILL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `CLUBBILL__MOLLIE__API_KEY=test_...` -> `mollie.api_key`
    /// - `CLUBBILL__RETRY__MAX_ATTEMPTS=5` -> `retry.max_attempts`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CLUBBILL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.billing.validate()?;
        self.retry.validate()?;
        self.mollie.validate()?;
        Ok(())
    }
}
