//! Field-level form validation.
//!
//! Validators are pure: they read a form and return a [`ValidationErrors`]
//! map. An empty map means the form may be submitted.

use crate::domain::{EmailAddress, MobileNumber};
use crate::models::{ContactForm, PackageForm};
use serde::Serialize;
use std::collections::BTreeMap;

pub const NAME_REQUIRED: &str = "Name is required";
pub const MOBILE_REQUIRED: &str = "Mobile number is required";
pub const MOBILE_INVALID: &str = "Please enter a valid mobile number";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const SUBJECT_REQUIRED: &str = "Subject is required";
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// Map from field name to a message shown next to that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding one error.
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Record an error for a field, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Drop the error for a field once the user edits it.
    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields with errors, in name order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_email(value: &str, errors: &mut ValidationErrors) {
    if is_blank(value) {
        errors.insert("email", EMAIL_REQUIRED);
    } else if !EmailAddress::is_valid(value) {
        errors.insert("email", EMAIL_INVALID);
    }
}

/// Validate the package selection modal.
///
/// `company` is optional and never produces an error.
pub fn validate_package_form(form: &PackageForm) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if is_blank(&form.name) {
        errors.insert("name", NAME_REQUIRED);
    }

    if is_blank(&form.mobile) {
        errors.insert("mobile", MOBILE_REQUIRED);
    } else if !MobileNumber::is_valid(&form.mobile) {
        errors.insert("mobile", MOBILE_INVALID);
    }

    check_email(&form.email, &mut errors);

    errors
}

/// Validate the contact form. Every field is required.
pub fn validate_contact_form(form: &ContactForm) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if is_blank(&form.name) {
        errors.insert("name", NAME_REQUIRED);
    }
    check_email(&form.email, &mut errors);
    if is_blank(&form.subject) {
        errors.insert("subject", SUBJECT_REQUIRED);
    }
    if is_blank(&form.message) {
        errors.insert("message", MESSAGE_REQUIRED);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package_form(name: &str, mobile: &str, email: &str) -> PackageForm {
        PackageForm {
            name: name.to_string(),
            company: String::new(),
            mobile: mobile.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_valid_package_form() {
        let errors = validate_package_form(&package_form("Ada", "+1 555 123 4567", "ada@x.com"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_all_package_fields_invalid() {
        let errors = validate_package_form(&package_form("", "0123", "bad"));
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("name"), Some(NAME_REQUIRED));
        assert_eq!(errors.get("mobile"), Some(MOBILE_INVALID));
        assert_eq!(errors.get("email"), Some(EMAIL_INVALID));
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let errors = validate_package_form(&package_form("   ", " ", "\t"));
        assert_eq!(errors.get("name"), Some(NAME_REQUIRED));
        assert_eq!(errors.get("mobile"), Some(MOBILE_REQUIRED));
        assert_eq!(errors.get("email"), Some(EMAIL_REQUIRED));
    }

    #[test]
    fn test_mobile_pattern_after_stripping_separators() {
        let accepted = ["123", "+8801804673095", "(555) 123-4567", "1234567890123456"];
        for mobile in accepted {
            let errors = validate_package_form(&package_form("Ada", mobile, "a@b.co"));
            assert!(!errors.contains("mobile"), "{} should be accepted", mobile);
        }

        let rejected = [
            "0",
            "+0123",
            "12345678901234567",
            "12a34",
            "+1+2",
            "555.1234",
            "1\u{0662}\u{0663}\u{0664}",
        ];
        for mobile in rejected {
            let errors = validate_package_form(&package_form("Ada", mobile, "a@b.co"));
            assert_eq!(
                errors.get("mobile"),
                Some(MOBILE_INVALID),
                "{} should be rejected",
                mobile
            );
        }
    }

    #[test]
    fn test_company_is_never_validated() {
        let mut form = package_form("Ada", "123", "a@b.co");
        form.company = "@@@ not checked @@@".to_string();
        assert!(validate_package_form(&form).is_empty());
    }

    #[test]
    fn test_contact_form_requires_every_field() {
        let errors = validate_contact_form(&ContactForm::default());
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["email", "message", "name", "subject"]);
    }

    #[test]
    fn test_contact_form_valid() {
        let form = ContactForm {
            name: "John".to_string(),
            email: "john@x.com".to_string(),
            subject: "Hi".to_string(),
            message: "Test".to_string(),
        };
        assert!(validate_contact_form(&form).is_empty());
    }

    #[test]
    fn test_clear_field() {
        let mut errors = validate_package_form(&package_form("", "", ""));
        assert!(errors.contains("name"));
        errors.clear_field("name");
        assert!(!errors.contains("name"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let errors = ValidationErrors::single("name", NAME_REQUIRED);
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"name":"Name is required"}"#);
    }
}
