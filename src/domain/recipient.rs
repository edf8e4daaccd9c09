//! RecipientId value object.

use super::errors::ValidationError;
use crate::config::DEFAULT_RECIPIENT;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The WhatsApp number messages are addressed to, digits only.
///
/// Recipients come from configuration, never from user input.
///
/// # Example
///
/// ```
/// use inquiry_relay::domain::RecipientId;
///
/// let recipient = RecipientId::new("8801804673095").unwrap();
/// assert_eq!(recipient.as_str(), "8801804673095");
/// assert!(RecipientId::new("+880 1804").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecipientId(String);

impl RecipientId {
    /// Create a new RecipientId.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidRecipient` if the value is empty or
    /// contains anything but ASCII digits.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidRecipient(id));
        }
        Ok(Self(id))
    }

    /// Get the recipient as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RecipientId {
    fn default() -> Self {
        Self(DEFAULT_RECIPIENT.to_string())
    }
}

impl Serialize for RecipientId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RecipientId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RecipientId::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
