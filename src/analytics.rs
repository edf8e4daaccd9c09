//! Fire-and-forget analytics.
//!
//! Tracking never fails the caller: events are written in the background and
//! errors are only logged.

use crate::client::Datastore;
use crate::clock::Clock;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// Datastore path for custom analytics events.
pub const ANALYTICS_EVENTS_PATH: &str = "analytics/events";

/// Event sent after a contact form is stored.
pub const CONTACT_SUBMISSION_EVENT: &str = "contact_submission";

/// Event sent whenever a user is handed off to WhatsApp.
pub const WHATSAPP_INTERACTION_EVENT: &str = "whatsapp_interaction";

/// Sink for analytics events.
pub trait Analytics: Send + Sync {
    /// Record an event. Must return promptly and never panic.
    fn track(&self, event: &str, properties: Value);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl Analytics for NoopAnalytics {
    fn track(&self, event: &str, _properties: Value) {
        tracing::trace!(event = %event, "Analytics disabled, dropping event");
    }
}

/// An analytics event as stored in the datastore.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Value,
    pub session_id: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Calendar day, `YYYY-MM-DD`
    pub date: String,
}

/// Writes events under [`ANALYTICS_EVENTS_PATH`] on a background task.
#[derive(Clone)]
pub struct DatastoreAnalytics {
    datastore: Arc<dyn Datastore>,
    clock: Arc<dyn Clock>,
    session_id: String,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl DatastoreAnalytics {
    pub fn new(datastore: Arc<dyn Datastore>, clock: Arc<dyn Clock>, session_id: impl Into<String>) -> Self {
        Self {
            datastore,
            clock,
            session_id: session_id.into(),
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Wait for every event tracked so far to be written (or fail).
    pub async fn flush(&self) {
        let handles: Vec<_> = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .drain(..)
            .collect();

        for handle in handles {
            if let Err(e) = handle.await {
                tracing::warn!("Analytics task did not complete: {}", e);
            }
        }
    }

    /// Build the stored form of an event.
    pub fn event(&self, event: &str, properties: Value) -> AnalyticsEvent {
        let now = self.clock.now();
        AnalyticsEvent {
            kind: event.to_string(),
            data: properties,
            session_id: self.session_id.clone(),
            timestamp: now.timestamp_millis(),
            date: now.naive_utc().date().format("%Y-%m-%d").to_string(),
        }
    }
}

impl Analytics for DatastoreAnalytics {
    fn track(&self, event: &str, properties: Value) {
        let record = match serde_json::to_value(self.event(event, properties)) {
            Ok(record) => record,
            Err(e) => {
                tracing::error!("Error encoding analytics event {}: {}", event, e);
                return;
            }
        };

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("No async runtime, dropping analytics event {}", event);
                return;
            }
        };

        let datastore = self.datastore.clone();
        let event = event.to_string();
        let task = handle.spawn(async move {
            if let Err(e) = datastore.write(ANALYTICS_EVENTS_PATH, record).await {
                tracing::error!("Error tracking analytics event {}: {}", event, e);
            }
        });

        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        pending.retain(|task| !task.is_finished());
        pending.push(task);
    }
}

impl std::fmt::Debug for DatastoreAnalytics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatastoreAnalytics")
            .field("session_id", &self.session_id)
            .finish()
    }
}
