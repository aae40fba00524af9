//! Mollie payment processor configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Default Mollie API endpoint.
const DEFAULT_BASE_URL: &str = "https://api.mollie.com";

/// Payment processor configuration (Mollie)
#[derive(Debug, Clone, Deserialize)]
pub struct MollieConfig {
    /// Mollie API key (live_... or test_...)
    pub api_key: SecretString,

    /// Base URL for the Mollie API
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl MollieConfig {
    /// Create a configuration with the default API endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            base_url: default_base_url(),
        }
    }

    /// Set a custom API base URL (for testing)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Expose the API key for request authentication
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Check if using Mollie test mode
    pub fn is_test_mode(&self) -> bool {
        self.api_key.expose_secret().starts_with("test_")
    }

    /// Check if using Mollie live mode
    pub fn is_live_mode(&self) -> bool {
        self.api_key.expose_secret().starts_with("live_")
    }

    /// Validate Mollie configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("MOLLIE_API_KEY"));
        }
        if !self.is_test_mode() && !self.is_live_mode() {
            return Err(ValidationError::InvalidMollieKey);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidMollieBaseUrl);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_prefix_detection() {
        let config = MollieConfig::new("test_dHar4XY7LxsDOtmnkVtjNVWXLSlXsM");
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn live_key_prefix_detection() {
        let config = MollieConfig::new("live_dHar4XY7LxsDOtmnkVtjNVWXLSlXsM");
        assert!(config.is_live_mode());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_key_is_rejected() {
        let config = MollieConfig::new("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn wrong_prefix_is_rejected() {
        let config = MollieConfig::new("sk_test_wrong_processor");
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let config = MollieConfig::new("test_key").with_base_url("ftp://api.mollie.com");
        assert!(config.validate().is_err());
    }
}
