//! Error types for the inquiry pipeline.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::validation::ValidationErrors;
use thiserror::Error;

/// Errors that can occur when talking to the remote datastore.
#[derive(Error, Debug)]
pub enum DatastoreError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Datastore returned an error status code
    #[error("Datastore error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to encode or parse JSON
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Path not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Write rejected by the datastore's security rules
    #[error("Permission denied")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Subscription stream closed or failed
    #[error("Subscription error: {0}")]
    Subscription(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors raised while handing a message off to WhatsApp.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RedirectError {
    /// The host refused to open the URL (e.g. a blocked pop-up)
    #[error("Navigation to {url} failed: {reason}")]
    NavigationFailed { url: String, reason: String },
}

/// Errors produced by a submission attempt.
#[derive(Error, Debug)]
pub enum SubmissionError {
    /// One or more form fields failed validation
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(ValidationErrors),

    /// The datastore write failed
    #[error("Failed to persist inquiry: {0}")]
    Persistence(#[from] DatastoreError),

    /// The deep link could not be opened
    #[error("Failed to open messaging link: {0}")]
    Redirect(#[from] RedirectError),

    /// A submission is already running for this form
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    /// The state machine was driven with an event it does not accept
    #[error("Invalid submission transition: {event} in state {state}")]
    InvalidTransition { state: String, event: String },
}

/// Convenience type alias for Results with DatastoreError
pub type DatastoreResult<T> = Result<T, DatastoreError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with SubmissionError
pub type SubmissionResult<T> = Result<T, SubmissionError>;
