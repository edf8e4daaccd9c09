//! Application service layer.
//!
//! The submission service orchestrates one form's life cycle: validate,
//! persist, format, and hand off to WhatsApp. It depends only on traits
//! (repository, navigator, notifier, analytics) so every collaborator can be
//! replaced in tests.

mod notifications;
mod state;
mod submission_service;

pub use notifications::{LogNotifier, Notification, NotificationVariant, Notifier};
pub use state::{SubmissionEvent, SubmissionState};
pub use submission_service::{
    InquirySubmissionService, SubmissionOutcome, SubmissionPath, SubmissionService,
};
