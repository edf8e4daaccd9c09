//! Inquiry Relay - Main entry point
//!
//! Reads one submission as JSON on stdin, runs it through the pipeline and
//! prints the WhatsApp URL the visitor would be sent to on stdout.
//!
//! ```text
//! {"kind":"contact","name":"John","email":"john@x.com","subject":"Hi","message":"Test"}
//! {"kind":"package","package":{"name":"Starter","price":"$99",...},"user":{...}}
//! ```

use anyhow::{bail, Result};
use inquiry_relay::error::RedirectError;
use inquiry_relay::{
    Analytics, AsyncRealtimeDb, Config, ContactForm, Datastore, DatastoreAnalytics,
    DatastoreInquiryRepository, InquiryRepository, InquirySubmissionService, Launcher,
    LogNotifier, MessageFormatter, Navigator, PackageForm, RealtimeDbClient, ServicePackage,
    SubmissionService, SystemClock,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// One submission read from stdin.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Submission {
    Contact {
        #[serde(flatten)]
        form: ContactForm,
        user_agent: Option<String>,
    },
    Package {
        package: ServicePackage,
        #[serde(default)]
        user: PackageForm,
        user_agent: Option<String>,
    },
}

/// Writes followed links to stdout instead of a browser.
struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn navigate(&self, url: &str) -> Result<(), RedirectError> {
        info!("Navigating to {}", url);
        Ok(())
    }

    fn open_new_context(&self, url: &str) -> Result<(), RedirectError> {
        info!("Opening {} in a new context", url);
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the redirect URL
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(std::env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string()))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!("Using datastore at {}", config.datastore_url);

    let datastore =
        Arc::new(AsyncRealtimeDb::new(RealtimeDbClient::new(&config))) as Arc<dyn Datastore>;
    let repository =
        Arc::new(DatastoreInquiryRepository::new(datastore.clone())) as Arc<dyn InquiryRepository>;

    let clock = Arc::new(SystemClock);
    let session_id = format!(
        "session_{}_{}",
        chrono::Utc::now().timestamp_millis(),
        std::process::id()
    );
    let analytics = Arc::new(DatastoreAnalytics::new(datastore, clock.clone(), session_id));

    let launcher = Launcher::new(
        Arc::new(StdoutNavigator),
        config.recipient.clone(),
        config.app_fallback_delay(),
    );
    let service = InquirySubmissionService::new(
        repository,
        MessageFormatter::new(clock.clone(), config.source_label.clone()),
        launcher,
        Arc::new(LogNotifier),
    )
    .with_analytics(analytics.clone() as Arc<dyn Analytics>)
    .with_clock(clock)
    .with_redirect_delay(config.redirect_delay());

    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;
    let submission: Submission = serde_json::from_str(&input)?;

    let outcome = match submission {
        Submission::Contact {
            mut form,
            user_agent,
        } => service.submit_contact(&mut form, user_agent.as_deref()).await?,
        Submission::Package {
            package,
            mut user,
            user_agent,
        } => {
            service
                .submit_package(&package, &mut user, user_agent.as_deref())
                .await?
        }
    };

    // Background analytics writes must land before the runtime shuts down
    analytics.flush().await;

    let summary = service.metrics().summary();
    info!("Metrics: {:?}", summary);

    match outcome.redirect_url() {
        Some(url) => {
            println!("{}", url);
            Ok(())
        }
        None => {
            for (field, message) in outcome.errors.iter() {
                eprintln!("{}: {}", field, message);
            }
            match outcome.error {
                Some(e) => bail!("Submission was not delivered: {}", e),
                None => bail!("Submission was not delivered"),
            }
        }
    }
}
