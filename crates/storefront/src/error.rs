//! Unified error handling for the storefront.
//!
//! Every fallible storefront operation returns `Result<T, StorefrontError>`.
//! The variants map one-to-one onto how the failure should be surfaced:
//! validation errors attach to a named form field, network errors get a
//! generic retry message, and server-side validation messages are shown
//! verbatim.

use thiserror::Error;

/// Storefront-level error type.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Client-side validation failed for a specific input field.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the offending field (e.g. `shippingAddress`).
        field: &'static str,
        /// Human-readable description of the problem.
        message: String,
    },

    /// The backend was unreachable, timed out, or returned a 5xx.
    #[error("Network error: {0}")]
    Network(String),

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend rejected the request with its own validation message.
    #[error("{0}")]
    ServerValidation(String),
}

impl StorefrontError {
    /// Validation error for a named field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Whether this error should be retried by the caller.
    ///
    /// Only transport failures are retryable; validation and not-found
    /// failures will reproduce on retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for StorefrontError {
    /// Transport failures and timeouts both collapse to [`Self::Network`];
    /// callers present the same retry affordance for either.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("Request timed out: {err}"))
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
