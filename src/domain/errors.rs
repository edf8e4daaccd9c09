//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The provided mobile number is invalid.
    InvalidPhone(String),

    /// The recipient is empty or contains something other than digits.
    InvalidRecipient(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::InvalidPhone(phone) => write!(f, "Invalid mobile number: {}", phone),
            Self::InvalidRecipient(recipient) => {
                write!(f, "Recipient must be digits only, got: {:?}", recipient)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
