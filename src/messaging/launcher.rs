//! Opens a WhatsApp deep link in the way that suits the device.
//!
//! Desktop browsers go straight to wa.me in a new tab. Mobile browsers are
//! pointed at the `whatsapp://` scheme first; if the app has not taken over
//! when the fallback timer fires, wa.me is opened instead.

use crate::domain::RecipientId;
use crate::error::RedirectError;
use crate::messaging::link::MessagingLink;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;

static MOBILE_USER_AGENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini")
        .expect("valid user agent regex")
});

/// True when the user agent belongs to a phone or tablet browser.
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    MOBILE_USER_AGENT.is_match(user_agent)
}

/// The host environment that can follow links.
///
/// In a browser this wraps `window.location` and `window.open`; tests use a
/// recording implementation.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Navigate the current viewing context.
    fn navigate(&self, url: &str) -> Result<(), RedirectError>;

    /// Open a URL in a new viewing context.
    fn open_new_context(&self, url: &str) -> Result<(), RedirectError>;

    /// Resolves once a native app has intercepted the last navigation.
    ///
    /// Most hosts cannot observe this, so the default never resolves and the
    /// fallback timer always wins.
    async fn wait_for_app_handoff(&self) {
        std::future::pending::<()>().await
    }
}

/// How the message was finally handed off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Desktop: wa.me opened in a new context.
    Web { url: String },
    /// Mobile: the native app picked up the `whatsapp://` link.
    App { url: String },
    /// Mobile: the app did not respond in time, wa.me opened instead.
    WebFallback { app_url: String, url: String },
}

impl LaunchOutcome {
    /// The URL the user ended up on.
    pub fn url(&self) -> &str {
        match self {
            Self::Web { url } | Self::App { url } | Self::WebFallback { url, .. } => url,
        }
    }
}

/// Picks and opens the right deep link for a message.
#[derive(Clone)]
pub struct Launcher {
    navigator: Arc<dyn Navigator>,
    recipient: RecipientId,
    fallback_delay: Duration,
}

impl Launcher {
    pub fn new(navigator: Arc<dyn Navigator>, recipient: RecipientId, fallback_delay: Duration) -> Self {
        Self {
            navigator,
            recipient,
            fallback_delay,
        }
    }

    pub fn recipient(&self) -> &RecipientId {
        &self.recipient
    }

    /// Open `message` for the configured recipient.
    ///
    /// Without a user agent the host is treated as a desktop browser.
    pub async fn open(
        &self,
        message: &str,
        user_agent: Option<&str>,
    ) -> Result<LaunchOutcome, RedirectError> {
        let link = MessagingLink::new(&self.recipient, message);

        if !user_agent.map(is_mobile_user_agent).unwrap_or(false) {
            let url = link.web_url();
            tracing::debug!("Opening WhatsApp Web");
            self.navigator.open_new_context(&url)?;
            return Ok(LaunchOutcome::Web { url });
        }

        let app_url = link.app_url();
        tracing::debug!("Opening WhatsApp app, fallback in {:?}", self.fallback_delay);
        self.navigator.navigate(&app_url)?;

        // Whichever branch finishes first wins; the other future is dropped.
        tokio::select! {
            _ = self.navigator.wait_for_app_handoff() => {
                tracing::debug!("WhatsApp app took over");
                Ok(LaunchOutcome::App { url: app_url })
            }
            _ = tokio::time::sleep(self.fallback_delay) => {
                let url = link.web_url();
                tracing::debug!("WhatsApp app did not respond, falling back to web");
                self.navigator.open_new_context(&url)?;
                Ok(LaunchOutcome::WebFallback { app_url, url })
            }
        }
    }
}

impl std::fmt::Debug for Launcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Launcher")
            .field("recipient", &self.recipient)
            .field("fallback_delay", &self.fallback_delay)
            .finish()
    }
}
