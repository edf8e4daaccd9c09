//! MobileNumber value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// International number: optional '+', a leading 1-9, then at most 15 ASCII digits.
static MOBILE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("valid mobile regex"));

/// Separators users commonly type inside phone numbers.
static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\-()]").expect("valid separator regex"));

/// A type-safe wrapper for mobile numbers.
///
/// The number is kept as the user typed it (trimmed); validation runs on the
/// separator-stripped form.
///
/// # Example
///
/// ```
/// use inquiry_relay::domain::MobileNumber;
///
/// let mobile = MobileNumber::new("+880 (1804) 673-095").unwrap();
/// assert_eq!(mobile.as_str(), "+880 (1804) 673-095");
/// assert_eq!(mobile.digits_only(), "8801804673095");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Create a new MobileNumber, validating the format.
    ///
    /// # Validation Rules
    ///
    /// - Spaces, hyphens and parentheses are ignored
    /// - What remains must be an optional '+' followed by 1 to 16 ASCII digits,
    ///   the first of which is not 0
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if the format is invalid.
    pub fn new(mobile: impl Into<String>) -> Result<Self, ValidationError> {
        let mobile = mobile.into();

        if !Self::is_valid(&mobile) {
            return Err(ValidationError::InvalidPhone(mobile));
        }

        Ok(Self(mobile.trim().to_string()))
    }

    /// Check a number against the mobile pattern without constructing one.
    pub fn is_valid(mobile: &str) -> bool {
        MOBILE_PATTERN.is_match(&Self::strip_separators(mobile))
    }

    /// Remove whitespace, hyphens and parentheses.
    pub fn strip_separators(mobile: &str) -> String {
        SEPARATORS.replace_all(mobile, "").into_owned()
    }

    /// Get the number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Get the number with only digits (no formatting).
    pub fn digits_only(&self) -> String {
        self.0.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

// Serde support - serialize as string
impl Serialize for MobileNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for MobileNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MobileNumber::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_valid() {
        let mobile = MobileNumber::new("+1-555-1234").unwrap();
        assert_eq!(mobile.as_str(), "+1-555-1234");
    }

    #[test]
    fn test_mobile_validates_format() {
        assert!(MobileNumber::new("").is_err());
        assert!(MobileNumber::new("no digits").is_err());
        assert!(MobileNumber::new("0123456").is_err());
        assert!(MobileNumber::new("++15551234").is_err());
        assert!(MobileNumber::new("555.123.4567").is_err());
        assert!(MobileNumber::new("12345678901234567").is_err());
        // Arabic-Indic and full-width digits are not accepted
        assert!(MobileNumber::new("1\u{0662}\u{0663}\u{0664}").is_err());
        assert!(MobileNumber::new("\u{FF11}23").is_err());
        assert!(MobileNumber::new("123").is_ok());
        assert!(MobileNumber::new("1234567890123456").is_ok());
        assert!(MobileNumber::new("123-456-7890").is_ok());
        assert!(MobileNumber::new("+1 (555) 123-4567").is_ok());
        assert!(MobileNumber::new("+8801804673095").is_ok());
    }

    #[test]
    fn test_strip_separators() {
        assert_eq!(
            MobileNumber::strip_separators("+1 (555)\t123-4567"),
            "+15551234567"
        );
    }

    #[test]
    fn test_mobile_digits_only() {
        let mobile = MobileNumber::new("+1 (555) 123-4567").unwrap();
        assert_eq!(mobile.digits_only(), "15551234567");
    }

    #[test]
    fn test_mobile_deserialization_invalid_fails() {
        let result: Result<MobileNumber, _> = serde_json::from_str("\"invalid\"");
        assert!(result.is_err());
    }
}
