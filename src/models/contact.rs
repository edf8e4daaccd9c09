//! Contact form inquiry and its persisted record.

use crate::models::forms::ContactForm;
use crate::validation::{validate_contact_form, ValidationErrors};
use serde::{Deserialize, Serialize};

/// A validated contact form submission.
///
/// Only obtainable through [`ContactInquiry::from_form`], so every instance
/// has passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactInquiry {
    name: String,
    email: String,
    subject: String,
    message: String,
}

impl ContactInquiry {
    /// Validate the form and build an inquiry from its trimmed values.
    pub fn from_form(form: &ContactForm) -> Result<Self, ValidationErrors> {
        let errors = validate_contact_form(form);
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            subject: form.subject.trim().to_string(),
            message: form.message.trim().to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Build the record written to the datastore.
    pub fn to_record(&self, timestamp: i64, user_agent: Option<&str>) -> ContactRecord {
        ContactRecord {
            name: self.name.clone(),
            email: self.email.to_lowercase(),
            subject: self.subject.clone(),
            message: self.message.clone(),
            timestamp,
            status: "new".to_string(),
            ip: None,
            user_agent: user_agent.map(str::to_string),
        }
    }
}

/// Contact submission as stored under the `contacts` path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Triage status; always "new" on creation
    pub status: String,
    /// Left for the backend to fill in
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}
