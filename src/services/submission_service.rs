//! Inquiry submission service.
//!
//! Drives one submission from the submit click to the WhatsApp hand-off.
//! The two forms differ when the datastore write fails: a contact form stops
//! and reports the failure, a package inquiry still redirects because
//! reaching the business matters more than the stored copy.

use crate::analytics::{
    Analytics, NoopAnalytics, CONTACT_SUBMISSION_EVENT, WHATSAPP_INTERACTION_EVENT,
};
use crate::clock::{Clock, SystemClock};
use crate::error::{DatastoreError, SubmissionError, SubmissionResult};
use crate::messaging::{LaunchOutcome, Launcher, MessageFormatter};
use crate::metrics::Metrics;
use crate::models::{
    ContactForm, ContactInquiry, PackageForm, PackageInquiry, ServicePackage, UserInfo,
};
use crate::repositories::InquiryRepository;
use crate::services::notifications::{Notification, Notifier};
use crate::services::state::{SubmissionEvent, SubmissionState};
use crate::validation::ValidationErrors;
use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const RETRY_HINT: &str = "Please try again later.";

/// How a submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPath {
    /// Validation failed; nothing was written or opened.
    Invalid,
    /// Stored, then handed off to WhatsApp.
    Redirected,
    /// The write failed and the flow stopped.
    PersistFailed,
    /// The write failed but WhatsApp was opened anyway.
    FallbackRedirected,
    /// The deep link could not be opened.
    RedirectFailed,
}

/// Result of a finished submission.
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub path: SubmissionPath,

    /// Field errors when `path` is `Invalid`, otherwise empty
    pub errors: ValidationErrors,

    /// Datastore key of the stored record
    pub record_key: Option<String>,

    /// Where the user was sent
    pub launch: Option<LaunchOutcome>,

    /// The failure behind a non-`Redirected` path
    pub error: Option<SubmissionError>,

    /// The write failure behind a package fallback that then could not
    /// redirect; `error` holds the redirect failure in that case
    pub write_error: Option<DatastoreError>,

    /// States visited, starting with `Validating` and ending with `Idle`
    pub trail: Vec<SubmissionState>,
}

impl SubmissionOutcome {
    fn new(path: SubmissionPath) -> Self {
        Self {
            path,
            errors: ValidationErrors::new(),
            record_key: None,
            launch: None,
            error: None,
            write_error: None,
            trail: Vec::new(),
        }
    }

    /// URL of the final navigation, if any.
    pub fn redirect_url(&self) -> Option<&str> {
        self.launch.as_ref().map(LaunchOutcome::url)
    }

    /// True when the user was sent to WhatsApp.
    pub fn redirected(&self) -> bool {
        self.launch.is_some()
    }
}

/// Submission service trait for the two inquiry forms.
#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Submit the contact form. Fields are cleared once WhatsApp is opened.
    async fn submit_contact(
        &self,
        form: &mut ContactForm,
        user_agent: Option<&str>,
    ) -> SubmissionResult<SubmissionOutcome>;

    /// Submit the package modal for `package`. Fields are cleared once
    /// WhatsApp is opened.
    async fn submit_package(
        &self,
        package: &ServicePackage,
        form: &mut PackageForm,
        user_agent: Option<&str>,
    ) -> SubmissionResult<SubmissionOutcome>;

    /// Whether the contact form's submit control should be enabled.
    fn can_submit_contact(&self) -> bool;

    /// Whether the package modal's submit control should be enabled.
    fn can_submit_package(&self) -> bool;
}

/// Current state of one form plus the states a run has passed through.
///
/// While a run holds the form, dropping it (a cancelled or timed-out
/// submission) puts the form back to `Idle`.
struct Run<'a> {
    state: &'a Mutex<SubmissionState>,
    trail: Vec<SubmissionState>,
    holds_form: bool,
}

impl<'a> Run<'a> {
    /// Claim the form, failing if a submission is already running.
    fn begin(state: &'a Mutex<SubmissionState>) -> SubmissionResult<Self> {
        let mut run = Self {
            state,
            trail: Vec::new(),
            holds_form: false,
        };
        run.step(SubmissionEvent::Submit)?;
        run.holds_form = true;
        Ok(run)
    }

    fn step(&mut self, event: SubmissionEvent) -> SubmissionResult<()> {
        let mut current = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let next = current.transition(event)?;
        tracing::debug!("Submission {} -> {} ({:?})", *current, next, event);
        *current = next;
        self.trail.push(next);
        Ok(())
    }

    fn release(&mut self) {
        *self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = SubmissionState::Idle;
        self.holds_form = false;
    }

    /// Return the form to `Idle` and attach the trail to the outcome.
    fn finish(mut self, mut outcome: SubmissionOutcome) -> SubmissionResult<SubmissionOutcome> {
        let finished = self.step(SubmissionEvent::Finish);
        self.holds_form = false;
        if let Err(e) = finished {
            // Never leave the submit control disabled
            self.release();
            return Err(e);
        }
        outcome.trail = std::mem::take(&mut self.trail);
        Ok(outcome)
    }
}

impl Drop for Run<'_> {
    fn drop(&mut self) {
        if self.holds_form {
            tracing::debug!("Submission abandoned, releasing form");
            self.release();
        }
    }
}

/// Default implementation of SubmissionService.
pub struct InquirySubmissionService {
    repository: Arc<dyn InquiryRepository>,
    formatter: MessageFormatter,
    launcher: Launcher,
    notifier: Arc<dyn Notifier>,
    analytics: Arc<dyn Analytics>,
    clock: Arc<dyn Clock>,
    metrics: Metrics,
    redirect_delay: Duration,
    contact_state: Mutex<SubmissionState>,
    package_state: Mutex<SubmissionState>,
}

impl InquirySubmissionService {
    /// Create a new service with a system clock, no analytics and a 1500ms
    /// redirect delay.
    pub fn new(
        repository: Arc<dyn InquiryRepository>,
        formatter: MessageFormatter,
        launcher: Launcher,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            repository,
            formatter,
            launcher,
            notifier,
            analytics: Arc::new(NoopAnalytics),
            clock: Arc::new(SystemClock),
            metrics: Metrics::new(),
            redirect_delay: Duration::from_millis(1500),
            contact_state: Mutex::new(SubmissionState::Idle),
            package_state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn with_analytics(mut self, analytics: Arc<dyn Analytics>) -> Self {
        self.analytics = analytics;
        self
    }

    /// Clock used for record timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Pause between the success notification and the redirect.
    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn contact_state(&self) -> SubmissionState {
        Self::read(&self.contact_state)
    }

    pub fn package_state(&self) -> SubmissionState {
        Self::read(&self.package_state)
    }

    fn read(state: &Mutex<SubmissionState>) -> SubmissionState {
        *state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn reject_invalid(&self, errors: ValidationErrors) -> SubmissionOutcome {
        self.metrics.record_invalid_submission();
        self.notifier.notify(Notification::error(
            "Please fix the errors",
            "Complete all required fields with valid information.",
        ));
        let mut outcome = SubmissionOutcome::new(SubmissionPath::Invalid);
        outcome.errors = errors.clone();
        outcome.error = Some(SubmissionError::Validation(errors));
        outcome
    }

    fn record_write_failure(&self, error: &DatastoreError) {
        tracing::warn!("Failed to persist inquiry: {}", error);
        self.metrics.record_persist_failure();
    }

    /// Text shown when something went wrong: the collaborator's detail when
    /// there is one, always followed by a retry hint.
    fn failure_description(error: &DatastoreError) -> String {
        let detail = match error {
            DatastoreError::ApiError { message, .. } | DatastoreError::NotFound(message) => {
                message.trim().trim_end_matches('.').to_string()
            }
            DatastoreError::Unauthorized => "Permission denied".to_string(),
            DatastoreError::Timeout => "The request timed out".to_string(),
            DatastoreError::RateLimitExceeded => "Too many requests".to_string(),
            _ => String::new(),
        };

        if detail.is_empty() {
            RETRY_HINT.to_string()
        } else {
            format!("{}. {}", detail, RETRY_HINT)
        }
    }

    async fn launch(&self, message: &str, user_agent: Option<&str>) -> SubmissionResult<LaunchOutcome> {
        let launch = self.launcher.open(message, user_agent).await?;
        self.metrics.record_redirect();
        Ok(launch)
    }
}

#[async_trait]
impl SubmissionService for InquirySubmissionService {
    async fn submit_contact(
        &self,
        form: &mut ContactForm,
        user_agent: Option<&str>,
    ) -> SubmissionResult<SubmissionOutcome> {
        let mut run = Run::begin(&self.contact_state)?;

        let inquiry = match ContactInquiry::from_form(form) {
            Ok(inquiry) => inquiry,
            Err(errors) => {
                run.step(SubmissionEvent::ValidationFailed)?;
                return run.finish(self.reject_invalid(errors));
            }
        };

        run.step(SubmissionEvent::ValidationPassed)?;
        self.metrics.record_submission();

        let record = inquiry.to_record(self.clock.now_millis(), user_agent);
        let ack = match self.repository.save_contact(&record).await {
            Ok(ack) => ack,
            Err(e) => {
                run.step(SubmissionEvent::WriteFailed)?;
                self.record_write_failure(&e);
                self.notifier.notify(Notification::error(
                    "Submission Failed",
                    Self::failure_description(&e),
                ));
                let mut outcome = SubmissionOutcome::new(SubmissionPath::PersistFailed);
                outcome.error = Some(SubmissionError::Persistence(e));
                return run.finish(outcome);
            }
        };

        run.step(SubmissionEvent::WriteAcknowledged)?;
        self.metrics.record_persisted();
        tracing::info!("Contact inquiry stored as {}", ack.key);
        self.analytics
            .track(CONTACT_SUBMISSION_EVENT, json!({ "method": "form" }));
        self.notifier.notify(Notification::info(
            "Message Sent Successfully!",
            "Redirecting to WhatsApp for instant communication...",
        ));

        tokio::time::sleep(self.redirect_delay).await;
        run.step(SubmissionEvent::DelayElapsed)?;

        let message = self.formatter.contact_message(&inquiry);
        run.step(SubmissionEvent::MessageFormatted)?;

        let mut outcome = match self.launch(&message, user_agent).await {
            Ok(launch) => {
                self.analytics.track(
                    WHATSAPP_INTERACTION_EVENT,
                    json!({
                        "type": "contact",
                        "subject": inquiry.subject(),
                        "hasEmail": !inquiry.email().is_empty(),
                        "source": "form_submission",
                    }),
                );
                form.clear();
                let mut outcome = SubmissionOutcome::new(SubmissionPath::Redirected);
                outcome.launch = Some(launch);
                outcome
            }
            Err(e) => {
                tracing::error!("Failed to open WhatsApp: {}", e);
                self.notifier
                    .notify(Notification::error("Submission Failed", RETRY_HINT));
                let mut outcome = SubmissionOutcome::new(SubmissionPath::RedirectFailed);
                outcome.error = Some(e);
                outcome
            }
        };
        outcome.record_key = Some(ack.key);
        run.finish(outcome)
    }

    async fn submit_package(
        &self,
        package: &ServicePackage,
        form: &mut PackageForm,
        user_agent: Option<&str>,
    ) -> SubmissionResult<SubmissionOutcome> {
        let mut run = Run::begin(&self.package_state)?;

        let user = match UserInfo::from_form(form) {
            Ok(user) => user,
            Err(errors) => {
                run.step(SubmissionEvent::ValidationFailed)?;
                return run.finish(self.reject_invalid(errors));
            }
        };

        run.step(SubmissionEvent::ValidationPassed)?;
        self.metrics.record_submission();

        let inquiry = PackageInquiry::new(package.clone(), user);
        let record = inquiry.to_record(self.clock.now_millis(), user_agent);
        let write = self.repository.save_package_inquiry(&record).await;

        let outcome = match write {
            Ok(ack) => {
                run.step(SubmissionEvent::WriteAcknowledged)?;
                self.metrics.record_persisted();
                tracing::info!("Package inquiry stored as {}", ack.key);
                self.analytics.track(
                    WHATSAPP_INTERACTION_EVENT,
                    json!({
                        "type": "package",
                        "packageName": package.name,
                        "packagePrice": package.price,
                        "packageFeatured": package.featured,
                        "source": "package_modal",
                        "hasUserInfo": true,
                    }),
                );
                self.notifier.notify(Notification::info(
                    "Inquiry Submitted Successfully!",
                    "Redirecting to WhatsApp for instant communication...",
                ));

                tokio::time::sleep(self.redirect_delay).await;
                run.step(SubmissionEvent::DelayElapsed)?;

                let message = self
                    .formatter
                    .package_message(inquiry.package(), Some(inquiry.user()));
                run.step(SubmissionEvent::MessageFormatted)?;

                let mut outcome = match self.launch(&message, user_agent).await {
                    Ok(launch) => {
                        form.clear();
                        let mut outcome = SubmissionOutcome::new(SubmissionPath::Redirected);
                        outcome.launch = Some(launch);
                        outcome
                    }
                    Err(e) => {
                        tracing::error!("Failed to open WhatsApp: {}", e);
                        self.notifier
                            .notify(Notification::error("Submission Failed", RETRY_HINT));
                        let mut outcome = SubmissionOutcome::new(SubmissionPath::RedirectFailed);
                        outcome.error = Some(e);
                        outcome
                    }
                };
                outcome.record_key = Some(ack.key);
                outcome
            }
            Err(write_error) => {
                run.step(SubmissionEvent::WriteFailed)?;
                self.record_write_failure(&write_error);
                run.step(SubmissionEvent::FallbackStarted)?;

                let message = self
                    .formatter
                    .package_message(inquiry.package(), Some(inquiry.user()));

                match self.launch(&message, user_agent).await {
                    Ok(launch) => {
                        self.notifier.notify(Notification::info(
                            "Opening WhatsApp...",
                            "Your inquiry has been prepared. Complete sending in WhatsApp.",
                        ));
                        form.clear();
                        let mut outcome =
                            SubmissionOutcome::new(SubmissionPath::FallbackRedirected);
                        outcome.launch = Some(launch);
                        outcome.error = Some(SubmissionError::Persistence(write_error));
                        outcome
                    }
                    Err(e) => {
                        tracing::error!(
                            "Fallback to WhatsApp failed: {} (write error: {})",
                            e,
                            write_error
                        );
                        self.notifier.notify(Notification::error(
                            "Submission Failed",
                            Self::failure_description(&write_error),
                        ));
                        let mut outcome = SubmissionOutcome::new(SubmissionPath::RedirectFailed);
                        outcome.error = Some(e);
                        outcome.write_error = Some(write_error);
                        outcome
                    }
                }
            }
        };

        run.finish(outcome)
    }

    fn can_submit_contact(&self) -> bool {
        !self.contact_state().is_busy()
    }

    fn can_submit_package(&self) -> bool {
        !self.package_state().is_busy()
    }
}
