//! Vietnamese mobile phone number type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Human-readable description of the accepted format, used in validation
/// messages shown next to the phone field.
pub const PHONE_FORMAT_HINT: &str =
    "a Vietnamese mobile number: 0 or +84, a valid carrier prefix, then 7 digits";

/// Leading `0` or `+84`, a two-digit carrier prefix, then 7 subscriber digits.
/// Carrier prefixes: 03x (32-39), 05x (52/55/56/58/59), 07x (70/76-79),
/// 08x (81-89), 09x (90-99).
#[allow(clippy::unwrap_used)]
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0|\+84)(3[2-9]|5[25689]|7[06-9]|8[1-9]|9[0-9])\d{7}$").unwrap()
});

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty after trimming.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input does not match the Vietnamese mobile pattern.
    #[error("phone number must be {PHONE_FORMAT_HINT}")]
    InvalidFormat,
}

/// A validated Vietnamese mobile phone number.
///
/// ## Constraints
///
/// - Leading `0` (national) or `+84` (international)
/// - Followed by one of the fixed two-digit carrier prefixes
/// - Followed by exactly 7 digits
///
/// ## Examples
///
/// ```
/// use mekong_core::PhoneNumber;
///
/// assert!(PhoneNumber::parse("0912345678").is_ok());
/// assert!(PhoneNumber::parse("+84912345678").is_ok());
///
/// assert!(PhoneNumber::parse("12345").is_err());
/// assert!(PhoneNumber::parse("+1234567890").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse a `PhoneNumber` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::Empty`] for blank input and
    /// [`PhoneError::InvalidFormat`] when the trimmed input does not match
    /// the Vietnamese mobile pattern.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }
        if !PHONE_PATTERN.is_match(trimmed) {
            return Err(PhoneError::InvalidFormat);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PhoneNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
