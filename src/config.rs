//! Configuration management for the inquiry pipeline.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is honoured when present.

use crate::domain::RecipientId;
use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::time::Duration;

/// Business WhatsApp number used when `WHATSAPP_RECIPIENT` is not set.
pub const DEFAULT_RECIPIENT: &str = "8801804673095";

/// Source tag appended to every outgoing message.
pub const DEFAULT_SOURCE_LABEL: &str = "Toiral Website";

/// Configuration for the inquiry pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Realtime Database base URL (e.g. `https://project.firebaseio.com`)
    pub datastore_url: String,

    /// Optional auth token appended to datastore requests
    pub datastore_auth: Option<String>,

    /// WhatsApp recipient, digits only
    pub recipient: RecipientId,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Pause between the success notification and the redirect (default: 1500ms)
    pub redirect_delay_ms: u64,

    /// How long the native app gets to take over before the web link opens (default: 1000ms)
    pub app_fallback_delay_ms: u64,

    /// Label used in the `Source:` line of messages
    pub source_label: String,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `DATASTORE_URL`: Base URL of the Realtime Database
    ///
    /// Optional environment variables:
    /// - `DATASTORE_AUTH`: Auth token for the datastore
    /// - `WHATSAPP_RECIPIENT`: Recipient phone number, digits only
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `REDIRECT_DELAY_MS`: Delay before redirecting (default: 1500)
    /// - `APP_FALLBACK_DELAY_MS`: Native app fallback delay (default: 1000)
    /// - `SOURCE_LABEL`: Source tag (default: "Toiral Website")
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let datastore_url = env::var("DATASTORE_URL")
            .map_err(|_| ConfigError::MissingVar("DATASTORE_URL".to_string()))?;

        if !datastore_url.starts_with("http://") && !datastore_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "DATASTORE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let datastore_auth = env::var("DATASTORE_AUTH")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let recipient_raw =
            env::var("WHATSAPP_RECIPIENT").unwrap_or_else(|_| DEFAULT_RECIPIENT.to_string());
        let recipient =
            RecipientId::new(recipient_raw.as_str()).map_err(|e| ConfigError::InvalidValue {
                var: "WHATSAPP_RECIPIENT".to_string(),
                reason: e.to_string(),
            })?;

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let redirect_delay_ms = Self::parse_env_u64("REDIRECT_DELAY_MS", 1500)?;
        let app_fallback_delay_ms = Self::parse_env_u64("APP_FALLBACK_DELAY_MS", 1000)?;

        let source_label =
            env::var("SOURCE_LABEL").unwrap_or_else(|_| DEFAULT_SOURCE_LABEL.to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            datastore_url,
            datastore_auth,
            recipient,
            request_timeout,
            redirect_delay_ms,
            app_fallback_delay_ms,
            source_label,
            log_level,
        })
    }

    /// Delay between the success notification and the redirect.
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Time the native app gets before falling back to the web link.
    pub fn app_fallback_delay(&self) -> Duration {
        Duration::from_millis(self.app_fallback_delay_ms)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            datastore_url: String::new(),
            datastore_auth: None,
            recipient: RecipientId::default(),
            request_timeout: 10,
            redirect_delay_ms: 1500,
            app_fallback_delay_ms: 1000,
            source_label: DEFAULT_SOURCE_LABEL.to_string(),
            log_level: "error".to_string(),
        }
    }
}
