use async_trait::async_trait;
use inquiry_relay::error::RedirectError;
use inquiry_relay::messaging::Navigator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    SameContext,
    NewContext,
}

/// Navigator that records every URL instead of following it.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    visits: Arc<Mutex<Vec<(NavigationKind, String)>>>,
    refuse: Arc<AtomicBool>,
    app_installed: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every navigation, like a blocked pop-up.
    pub fn refuse_navigation(&self) {
        self.refuse.store(true, Ordering::SeqCst);
    }

    /// Pretend the native app takes over `whatsapp://` links at once.
    pub fn with_app_installed(self) -> Self {
        self.app_installed.store(true, Ordering::SeqCst);
        self
    }

    pub fn visits(&self) -> Vec<(NavigationKind, String)> {
        self.visits.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.visits().into_iter().map(|(_, url)| url).collect()
    }

    fn record(&self, kind: NavigationKind, url: &str) -> Result<(), RedirectError> {
        if self.refuse.load(Ordering::SeqCst) {
            return Err(RedirectError::NavigationFailed {
                url: url.to_string(),
                reason: "blocked".to_string(),
            });
        }
        self.visits.lock().unwrap().push((kind, url.to_string()));
        Ok(())
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) -> Result<(), RedirectError> {
        self.record(NavigationKind::SameContext, url)
    }

    fn open_new_context(&self, url: &str) -> Result<(), RedirectError> {
        self.record(NavigationKind::NewContext, url)
    }

    async fn wait_for_app_handoff(&self) {
        if !self.app_installed.load(Ordering::SeqCst) {
            std::future::pending::<()>().await
        }
    }
}
