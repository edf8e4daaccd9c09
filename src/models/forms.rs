//! Raw form state as typed by the user.

use serde::{Deserialize, Serialize};

/// Fields of the generic contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Reset every field to an empty string.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when every field is empty.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Fields of the package selection modal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageForm {
    pub name: String,
    pub company: String,
    pub mobile: String,
    pub email: String,
}

impl PackageForm {
    /// Reset every field to an empty string.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when every field is empty.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
