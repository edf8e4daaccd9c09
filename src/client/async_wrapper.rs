//! Async datastore interface over the synchronous RealtimeDbClient.
//!
//! `tokio::task::spawn_blocking` keeps the blocking HTTP calls off the async
//! runtime's worker threads.

use crate::client::{DatastoreEvent, RealtimeDbClient};
use crate::error::{DatastoreError, DatastoreResult};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Buffered events per subscription before the stream applies backpressure.
const SUBSCRIPTION_BUFFER: usize = 64;

/// Acknowledgement of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteAck {
    /// Path the record was written under
    pub path: String,

    /// Key generated for the new record
    pub key: String,
}

/// The remote document store the pipeline persists into.
///
/// The pipeline only ever writes; `subscribe` exists for consumers such as
/// an admin dashboard.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Append `record` under `path`.
    async fn write(&self, path: &str, record: serde_json::Value) -> DatastoreResult<WriteAck>;

    /// Receive changes under `path` until the receiver is dropped.
    async fn subscribe(&self, path: &str) -> DatastoreResult<mpsc::Receiver<DatastoreEvent>>;
}

/// Async wrapper around the synchronous RealtimeDbClient.
#[derive(Clone, Debug)]
pub struct AsyncRealtimeDb {
    client: Arc<RealtimeDbClient>,
}

impl AsyncRealtimeDb {
    pub fn new(client: RealtimeDbClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    pub fn client(&self) -> &RealtimeDbClient {
        &self.client
    }
}

#[async_trait]
impl Datastore for AsyncRealtimeDb {
    async fn write(&self, path: &str, record: serde_json::Value) -> DatastoreResult<WriteAck> {
        let client = self.client.clone();
        let path = path.to_string();

        tokio::task::spawn_blocking(move || {
            client
                .push(&path, &record)
                .map(|key| WriteAck { path, key })
        })
        .await
        .map_err(|e| DatastoreError::HttpError(format!("Task join error: {}", e)))?
    }

    async fn subscribe(&self, path: &str) -> DatastoreResult<mpsc::Receiver<DatastoreEvent>> {
        let client = self.client.clone();
        let path = path.to_string();
        let (sender, receiver) = mpsc::channel(SUBSCRIPTION_BUFFER);

        tokio::task::spawn_blocking(move || {
            if let Err(e) = client.stream(&path, sender) {
                tracing::warn!("Subscription to {} ended: {}", path, e);
            }
        });

        Ok(receiver)
    }
}
