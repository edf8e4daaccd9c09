use inquiry_relay::analytics::Analytics;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Analytics sink that records events synchronously.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct RecordingAnalytics {
    events: Arc<Mutex<Vec<(String, Value)>>>,
}

#[allow(dead_code)]
impl RecordingAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, Value)> {
        self.events.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|(name, _)| name).collect()
    }
}

impl Analytics for RecordingAnalytics {
    fn track(&self, event: &str, properties: Value) {
        self.events
            .lock()
            .unwrap()
            .push((event.to_string(), properties));
    }
}
