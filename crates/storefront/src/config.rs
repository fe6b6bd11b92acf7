//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `GREENBASKET_API_URL` - Base URL of the remote storefront API
//!   (e.g., `http://localhost:8082/api/v1`)
//!
//! ## Optional
//! - `GREENBASKET_SEARCH_DEBOUNCE_MS` - Quiet interval for the search
//!   debounce controller in milliseconds (default: 500)
//! - `GREENBASKET_AUTH_TOKEN` - Bearer credential for cart operations.
//!   Cart mutations are refused locally when no credential is present.

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront engine configuration.
///
/// Implements `Debug` manually to redact the bearer credential.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Base URL of the remote storefront API.
    pub api_url: Url,
    /// Quiet interval for the search debounce controller.
    pub search_debounce: Duration,
    /// Ambient bearer credential, when one is present.
    pub auth_token: Option<SecretString>,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("api_url", &self.api_url.as_str())
            .field("search_debounce", &self.search_debounce)
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl StorefrontConfig {
    /// Create a configuration with default debounce and no credential.
    #[must_use]
    pub const fn new(api_url: Url) -> Self {
        Self {
            api_url,
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            auth_token: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_url("GREENBASKET_API_URL", &get_required_env("GREENBASKET_API_URL")?)?;
        let search_debounce = parse_debounce_ms(
            "GREENBASKET_SEARCH_DEBOUNCE_MS",
            get_optional_env("GREENBASKET_SEARCH_DEBOUNCE_MS").as_deref(),
        )?;
        let auth_token = get_optional_env("GREENBASKET_AUTH_TOKEN").map(SecretString::from);

        Ok(Self {
            api_url,
            search_debounce,
            auth_token,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parse a base URL, rejecting values `url` cannot make sense of.
fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse the debounce quiet interval, falling back to the default.
fn parse_debounce_ms(key: &str, value: Option<&str>) -> Result<Duration, ConfigError> {
    let Some(value) = value else {
        return Ok(Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS));
    };
    value
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_debounce_default() {
        let debounce = parse_debounce_ms("TEST_VAR", None).unwrap();
        assert_eq!(debounce, Duration::from_millis(500));
    }

    #[test]
    fn test_parse_debounce_explicit() {
        let debounce = parse_debounce_ms("TEST_VAR", Some("250")).unwrap();
        assert_eq!(debounce, Duration::from_millis(250));
    }

    #[test]
    fn test_parse_debounce_invalid() {
        let result = parse_debounce_ms("TEST_VAR", Some("soon"));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_parse_url_invalid() {
        let result = parse_url("TEST_VAR", "not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_config_debug_redacts_token() {
        let mut config =
            StorefrontConfig::new(Url::parse("http://localhost:8082/api/v1").unwrap());
        config.auth_token = Some(SecretString::from("very-secret-bearer-token"));

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("http://localhost:8082/api/v1"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("very-secret-bearer-token"));
    }
}
