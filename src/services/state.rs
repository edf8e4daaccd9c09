//! Submission state machine.
//!
//! A single enum holds the state of one form's submission, and
//! [`SubmissionState::transition`] is the only way to move it.

use crate::error::{SubmissionError, SubmissionResult};
use std::fmt;

/// Where a form's submission currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// Ready for input; the submit control is enabled.
    #[default]
    Idle,
    Validating,
    /// Validation failed; errors are shown next to the fields.
    Invalid,
    /// Waiting for the datastore to acknowledge the write.
    Persisting,
    Persisted,
    PersistFailed,
    /// Handing off to WhatsApp even though the write failed.
    FallbackRedirect,
    Formatting,
    Redirecting,
}

/// Things that happen during a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    Submit,
    ValidationFailed,
    ValidationPassed,
    WriteAcknowledged,
    WriteFailed,
    FallbackStarted,
    DelayElapsed,
    MessageFormatted,
    /// The attempt reached its end, successfully or not.
    Finish,
}

impl SubmissionState {
    /// Apply an event, returning the next state.
    ///
    /// # Errors
    ///
    /// `SubmissionError::AlreadySubmitting` when `Submit` arrives while busy,
    /// `SubmissionError::InvalidTransition` for any other event the current
    /// state does not accept.
    pub fn transition(self, event: SubmissionEvent) -> SubmissionResult<Self> {
        use SubmissionEvent as E;
        use SubmissionState as S;

        match (self, event) {
            (S::Idle, E::Submit) => Ok(S::Validating),
            (_, E::Submit) => Err(SubmissionError::AlreadySubmitting),
            (S::Validating, E::ValidationFailed) => Ok(S::Invalid),
            (S::Validating, E::ValidationPassed) => Ok(S::Persisting),
            (S::Persisting, E::WriteAcknowledged) => Ok(S::Persisted),
            (S::Persisting, E::WriteFailed) => Ok(S::PersistFailed),
            (S::PersistFailed, E::FallbackStarted) => Ok(S::FallbackRedirect),
            (S::Persisted, E::DelayElapsed) => Ok(S::Formatting),
            (S::Formatting, E::MessageFormatted) => Ok(S::Redirecting),
            (S::Invalid | S::PersistFailed | S::FallbackRedirect | S::Redirecting, E::Finish) => {
                Ok(S::Idle)
            }
            (state, event) => Err(SubmissionError::InvalidTransition {
                state: state.to_string(),
                event: format!("{:?}", event),
            }),
        }
    }

    /// True while a submission is running and the submit control is disabled.
    pub fn is_busy(self) -> bool {
        self != SubmissionState::Idle
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
