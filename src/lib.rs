//! Inquiry Relay - contact and package inquiries delivered over WhatsApp.
//!
//! Visitors fill in either the contact form or the package selection modal.
//! Each submission is validated, stored in a Firebase Realtime Database, turned
//! into a formatted WhatsApp message and handed off through a deep link.
//!
//! # Architecture
//!
//! - **domain**: Validated value objects (email, mobile number, recipient)
//! - **models**: Form input, validated inquiries and their stored records
//! - **validation**: Field-level form validation
//! - **messaging**: Message formatting, deep links and the app/web launcher
//! - **client**: HTTP client for the Realtime Database
//! - **repositories**: Inquiry persistence
//! - **analytics**: Fire-and-forget event tracking
//! - **services**: The submission state machine and pipeline
//! - **config**: Configuration management from environment variables

pub mod analytics;
pub mod client;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod messaging;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod services;
pub mod validation;

pub use analytics::{Analytics, DatastoreAnalytics, NoopAnalytics};
pub use client::{AsyncRealtimeDb, Datastore, RealtimeDbClient};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{ConfigError, DatastoreError, RedirectError, SubmissionError};
pub use messaging::{LaunchOutcome, Launcher, MessageFormatter, MessagingLink, Navigator};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{ContactForm, PackageForm, ServicePackage};
pub use repositories::{DatastoreInquiryRepository, InquiryRepository};
pub use services::{
    InquirySubmissionService, LogNotifier, Notification, Notifier, SubmissionOutcome,
    SubmissionPath, SubmissionService, SubmissionState,
};
pub use validation::ValidationErrors;
