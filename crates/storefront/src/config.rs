//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MEKONG_API_BASE_URL` - Base URL of the commerce backend API
//!
//! ## Optional
//! - `MEKONG_API_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)
//! - `MEKONG_API_TOKEN` - Bearer token attached to every API request

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Base URL of the commerce backend API
    pub api_base_url: Url,
    /// Per-request timeout
    pub api_timeout: Duration,
    /// Bearer token for authenticated API requests
    pub api_token: Option<SecretString>,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("api_timeout", &self.api_timeout)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl StorefrontConfig {
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

        let api_base_url = get_required_env("MEKONG_API_BASE_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("MEKONG_API_BASE_URL".to_string(), e.to_string())
            })?;
        let timeout_secs = get_env_or_default(
            "MEKONG_API_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("MEKONG_API_TIMEOUT_SECS".to_string(), e.to_string())
        })?;
        let api_token = get_optional_env("MEKONG_API_TOKEN").map(SecretString::from);

        Ok(Self {
            api_base_url,
            api_timeout: Duration::from_secs(timeout_secs),
            api_token,
        })
    }

    /// Configuration suitable for tests and local fakes.
    ///
    /// # Panics
    ///
    /// Panics if `base_url` is not a valid URL.
    #[must_use]
    #[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
    #[cfg(test)]
    pub fn for_tests(base_url: &str) -> Self {
        Self {
            api_base_url: Url::parse(base_url).unwrap(),
            api_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            api_token: None,
        }
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

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
