//! HTTP client for the Firebase Realtime Database REST API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. Every node is addressed as `{base}/{path}.json`;
//! writes use `POST` so the database generates a chronologically ordered push key.

mod async_wrapper;
pub use async_wrapper::{AsyncRealtimeDb, Datastore, WriteAck};

use crate::config::Config;
use crate::error::{DatastoreError, DatastoreResult};
use crate::metrics::{HttpTimer, Metrics};
use serde::Deserialize;
use std::io::{BufRead, BufReader};
use std::sync::Arc;
use std::time::Duration;

/// Response body of a push (`POST`) request.
#[derive(Debug, Deserialize)]
pub struct PushResponse {
    /// The generated child key
    pub name: String,
}

/// A change delivered on a subscription.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatastoreEvent {
    /// Path of the change, relative to the subscribed path
    pub path: String,

    /// New value at `path` (`null` when the node was removed)
    pub data: serde_json::Value,
}

/// Outcome of one server-sent event.
enum StreamFrame {
    Change(DatastoreEvent),
    Ignore,
    Closed(DatastoreError),
}

/// HTTP client for the Realtime Database.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct RealtimeDbClient {
    /// Database URL, e.g. `https://project-default-rtdb.firebaseio.com`
    base_url: String,

    /// Optional auth token sent as the `auth` query parameter
    auth: Option<String>,

    /// Per-request timeout for writes
    request_timeout: Duration,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl RealtimeDbClient {
    /// Create a new client from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.datastore_url.clone(),
            config.datastore_auth.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, auth: Option<String>) -> Self {
        Self::build(base_url, auth, Duration::from_secs(10))
    }

    fn build(base_url: String, auth: Option<String>, request_timeout: Duration) -> Self {
        // No overall timeout on the agent: subscriptions are long-lived streams.
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(request_timeout)
            .build();

        Self {
            base_url,
            auth,
            request_timeout,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL for a database path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_matches('/');
        match &self.auth {
            Some(token) => format!(
                "{}/{}.json?auth={}",
                base,
                path,
                urlencoding::encode(token)
            ),
            None => format!("{}/{}.json", base, path),
        }
    }

    /// Append a record under `path`, returning the generated key.
    pub fn push(&self, path: &str, record: &serde_json::Value) -> DatastoreResult<String> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);

        tracing::debug!("POST /{}.json", path.trim_matches('/'));

        let result = self
            .agent
            .post(&url)
            .timeout(self.request_timeout)
            .set("Content-Type", "application/json")
            .send_json(record)
            .map_err(|e| self.map_error(e));

        let response = match result {
            Ok(response) => {
                timer.complete();
                response
            }
            Err(e) => {
                tracing::error!("POST /{}.json - Error: {}", path.trim_matches('/'), e);
                timer.complete_with_error();
                return Err(e);
            }
        };

        let body = response
            .into_string()
            .map_err(|e| DatastoreError::HttpError(e.to_string()))?;
        let pushed: PushResponse = serde_json::from_str(&body)?;

        tracing::debug!("Stored record {} under {}", pushed.name, path);
        Ok(pushed.name)
    }

    /// Stream changes under `path` until the receiver goes away.
    ///
    /// Blocks the calling thread; run it on a blocking task. The first event
    /// carries the current value of the whole node.
    pub fn stream(
        &self,
        path: &str,
        sender: tokio::sync::mpsc::Sender<DatastoreEvent>,
    ) -> DatastoreResult<()> {
        let url = self.build_url(path);

        tracing::debug!("GET /{}.json (event stream)", path.trim_matches('/'));

        let response = self
            .agent
            .get(&url)
            .set("Accept", "text/event-stream")
            .call()
            .map_err(|e| self.map_error(e))?;

        let reader = BufReader::new(response.into_reader());
        let mut frame = FrameBuffer::default();

        for line in reader.lines() {
            let line = line.map_err(|e| DatastoreError::Subscription(e.to_string()))?;

            let Some((event_name, data)) = frame.feed(&line) else {
                continue;
            };
            if sender.is_closed() {
                tracing::debug!("Subscriber dropped, closing stream");
                return Ok(());
            }
            match Self::parse_frame(&event_name, &data) {
                StreamFrame::Change(event) => {
                    if sender.blocking_send(event).is_err() {
                        tracing::debug!("Subscriber dropped, closing stream");
                        return Ok(());
                    }
                }
                StreamFrame::Ignore => {}
                StreamFrame::Closed(e) => return Err(e),
            }
        }

        Err(DatastoreError::Subscription("stream ended".to_string()))
    }

    fn parse_frame(event_name: &str, data: &str) -> StreamFrame {
        match event_name {
            "put" | "patch" => match serde_json::from_str::<DatastoreEvent>(data) {
                Ok(event) => StreamFrame::Change(event),
                Err(e) => {
                    tracing::warn!("Skipping malformed {} event: {}", event_name, e);
                    StreamFrame::Ignore
                }
            },
            "cancel" => StreamFrame::Closed(DatastoreError::Unauthorized),
            "auth_revoked" => {
                StreamFrame::Closed(DatastoreError::Subscription("auth revoked".to_string()))
            }
            _ => StreamFrame::Ignore,
        }
    }

    /// Map a ureq error to a DatastoreError.
    fn map_error(&self, error: ureq::Error) -> DatastoreError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 | 403 => DatastoreError::Unauthorized,
                    404 => DatastoreError::NotFound(message),
                    429 => DatastoreError::RateLimitExceeded,
                    _ => DatastoreError::ApiError {
                        status: code,
                        message: Self::firebase_error_message(message),
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    DatastoreError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    DatastoreError::Timeout
                } else {
                    DatastoreError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Firebase wraps errors as `{"error": "..."}`; unwrap when possible.
    fn firebase_error_message(body: String) -> String {
        serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| value.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or(body)
    }
}

impl std::fmt::Debug for RealtimeDbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeDbClient")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Collects `event:` and `data:` lines until the blank line ending a frame.
///
/// Multiple `data:` lines are joined with a newline. One space after the
/// colon is dropped; anything else is part of the value.
#[derive(Debug, Default)]
struct FrameBuffer {
    event: String,
    data: Option<String>,
}

impl FrameBuffer {
    fn feed(&mut self, line: &str) -> Option<(String, String)> {
        if line.is_empty() {
            let event = std::mem::take(&mut self.event);
            let data = self.data.take().unwrap_or_default();
            return Some((event, data));
        }

        if let Some(value) = Self::field(line, "event") {
            self.event = value.to_string();
        } else if let Some(value) = Self::field(line, "data") {
            match self.data.as_mut() {
                Some(data) => {
                    data.push('\n');
                    data.push_str(value);
                }
                None => self.data = Some(value.to_string()),
            }
        }
        None
    }

    fn field<'l>(line: &'l str, name: &str) -> Option<&'l str> {
        let value = line.strip_prefix(name)?.strip_prefix(':')?;
        Some(value.strip_prefix(' ').unwrap_or(value))
    }
}
