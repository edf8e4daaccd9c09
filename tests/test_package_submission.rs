//! Integration tests for the package selection modal pipeline.

mod mocks;

use inquiry_relay::clock::{Clock, FixedClock};
use inquiry_relay::domain::RecipientId;
use inquiry_relay::error::{DatastoreError, SubmissionError};
use inquiry_relay::messaging::link::message_from_url;
use inquiry_relay::messaging::{LaunchOutcome, Launcher, MessageFormatter};
use inquiry_relay::models::{PackageForm, ServicePackage};
use inquiry_relay::services::{
    InquirySubmissionService, SubmissionPath, SubmissionService, SubmissionState,
};
use mocks::{MockInquiryRepository, RecordingAnalytics, RecordingNavigator, RecordingNotifier};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

struct Harness {
    repository: MockInquiryRepository,
    navigator: RecordingNavigator,
    notifier: RecordingNotifier,
    analytics: RecordingAnalytics,
}

impl Harness {
    fn new() -> Self {
        Self {
            repository: MockInquiryRepository::new(),
            navigator: RecordingNavigator::new(),
            notifier: RecordingNotifier::new(),
            analytics: RecordingAnalytics::new(),
        }
    }

    fn service(&self) -> InquirySubmissionService {
        let clock: Arc<dyn Clock> =
            Arc::new(FixedClock::parse("2024-03-05T14:07:09+06:00").unwrap());
        let launcher = Launcher::new(
            Arc::new(self.navigator.clone()),
            RecipientId::default(),
            Duration::from_millis(1000),
        );

        InquirySubmissionService::new(
            Arc::new(self.repository.clone()),
            MessageFormatter::new(clock.clone(), "Toiral Website"),
            launcher,
            Arc::new(self.notifier.clone()),
        )
        .with_analytics(Arc::new(self.analytics.clone()))
        .with_clock(clock)
    }
}

fn starter() -> ServicePackage {
    ServicePackage {
        name: "Starter".to_string(),
        price: "৳15,000".to_string(),
        description: "A simple site to get going".to_string(),
        features: vec!["5 pages".to_string(), "Contact form".to_string()],
        featured: true,
    }
}

fn ada_form() -> PackageForm {
    PackageForm {
        name: " Ada Lovelace ".to_string(),
        company: "Acme".to_string(),
        mobile: "+1 (555) 123-4567".to_string(),
        email: "Ada@Example.com".to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_package_success_redirects_with_customer_details() {
    let harness = Harness::new();
    let service = harness.service();
    let mut form = ada_form();

    let start = Instant::now();
    let outcome = service
        .submit_package(&starter(), &mut form, None)
        .await
        .unwrap();

    assert_eq!(outcome.path, SubmissionPath::Redirected);
    assert_eq!(outcome.record_key.as_deref(), Some("-Npackage1"));
    assert!(start.elapsed() >= Duration::from_millis(1500));

    let message = message_from_url(outcome.redirect_url().unwrap()).unwrap();
    assert!(message.starts_with("🎯 *Package Selection from Website*"));
    assert!(message.contains("📦 *Selected Package:* Starter"));
    assert!(message.contains("\n1. 5 pages\n2. Contact form"));
    assert!(message.contains("• Name: Ada Lovelace"));
    assert!(message.contains("• Email: ada@example.com"));
    assert!(message.contains("• Company: Acme"));
    assert!(message.contains("I'm interested in the Starter package."));

    assert!(form.is_empty());
    assert_eq!(
        harness.notifier.titles(),
        vec!["Inquiry Submitted Successfully!"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_package_record_layout() {
    let harness = Harness::new();
    let service = harness.service();

    service
        .submit_package(&starter(), &mut ada_form(), Some("Mozilla/5.0"))
        .await
        .unwrap();

    let inquiries = harness.repository.package_inquiries();
    assert_eq!(inquiries.len(), 1);

    let record = serde_json::to_value(&inquiries[0]).unwrap();
    assert_eq!(record["packageName"], "Starter");
    assert_eq!(record["packagePrice"], "৳15,000");
    assert_eq!(record["packageFeatured"], true);
    assert_eq!(record["userInfo"]["name"], "Ada Lovelace");
    assert_eq!(record["userInfo"]["email"], "ada@example.com");
    assert_eq!(record["userInfo"]["company"], "Acme");
    assert_eq!(record["type"], "package_inquiry");
    assert_eq!(record["status"], "new");
    assert_eq!(record["userAgent"], "Mozilla/5.0");
    assert_eq!(record["timestamp"], 1_709_626_029_000_i64);
}

#[tokio::test(start_paused = true)]
async fn test_package_tracks_interaction() {
    let harness = Harness::new();
    let service = harness.service();

    service
        .submit_package(&starter(), &mut ada_form(), None)
        .await
        .unwrap();

    let events = harness.analytics.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, "whatsapp_interaction");
    assert_eq!(events[0].1["type"], "package");
    assert_eq!(events[0].1["packageName"], "Starter");
    assert_eq!(events[0].1["packageFeatured"], true);
    assert_eq!(events[0].1["source"], "package_modal");
    assert_eq!(events[0].1["hasUserInfo"], true);
}

#[tokio::test(start_paused = true)]
async fn test_package_invalid_form_collects_every_error() {
    let harness = Harness::new();
    let service = harness.service();
    let mut form = PackageForm {
        name: String::new(),
        company: String::new(),
        mobile: "0123".to_string(),
        email: "bad".to_string(),
    };
    let before = form.clone();

    let outcome = service
        .submit_package(&starter(), &mut form, None)
        .await
        .unwrap();

    assert_eq!(outcome.path, SubmissionPath::Invalid);
    assert_eq!(outcome.errors.len(), 3);
    assert_eq!(outcome.errors.get("name"), Some("Name is required"));
    assert_eq!(
        outcome.errors.get("mobile"),
        Some("Please enter a valid mobile number")
    );
    assert_eq!(
        outcome.errors.get("email"),
        Some("Please enter a valid email address")
    );

    assert_eq!(harness.repository.get_call_count("save_package_inquiry"), 0);
    assert!(harness.navigator.visits().is_empty());
    assert!(outcome.redirect_url().is_none());
    assert_eq!(form, before);
    assert_eq!(service.package_state(), SubmissionState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_package_persist_failure_still_redirects() {
    let harness = Harness::new();
    harness.repository.fail_with(401, "Permission denied");
    let service = harness.service();
    let mut form = ada_form();

    let start = Instant::now();
    let outcome = service
        .submit_package(&starter(), &mut form, None)
        .await
        .unwrap();

    assert_eq!(outcome.path, SubmissionPath::FallbackRedirected);
    assert!(outcome.record_key.is_none());
    assert!(matches!(outcome.error, Some(SubmissionError::Persistence(_))));
    assert!(outcome.write_error.is_none());

    // No success delay on the fallback path
    assert!(start.elapsed() < Duration::from_millis(1500));

    let url = outcome.redirect_url().unwrap();
    assert!(url.starts_with("https://wa.me/8801804673095?text="));
    assert!(message_from_url(url).unwrap().contains("• Name: Ada Lovelace"));
    assert_eq!(harness.navigator.urls(), vec![url.to_string()]);

    let notification = harness.notifier.last().unwrap();
    assert_eq!(notification.title, "Opening WhatsApp...");
    assert_eq!(
        notification.description,
        "Your inquiry has been prepared. Complete sending in WhatsApp."
    );
    assert!(form.is_empty());

    assert_eq!(
        outcome.trail,
        vec![
            SubmissionState::Validating,
            SubmissionState::Persisting,
            SubmissionState::PersistFailed,
            SubmissionState::FallbackRedirect,
            SubmissionState::Idle,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_package_fallback_on_mobile_uses_app_link_first() {
    let harness = Harness::new();
    harness.repository.fail_with(500, "Internal error");
    let service = harness.service();

    let outcome = service
        .submit_package(
            &starter(),
            &mut ada_form(),
            Some("Mozilla/5.0 (Linux; Android 14; Pixel 8)"),
        )
        .await
        .unwrap();

    assert_eq!(outcome.path, SubmissionPath::FallbackRedirected);
    let urls = harness.navigator.urls();
    assert_eq!(urls.len(), 2);
    assert!(urls[0].starts_with("whatsapp://send?phone=8801804673095&text="));
    assert!(matches!(
        outcome.launch,
        Some(LaunchOutcome::WebFallback { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_package_fallback_blocked_reports_write_error() {
    let harness = Harness::new();
    harness.repository.fail_with(500, "Internal error");
    harness.navigator.refuse_navigation();
    let service = harness.service();
    let mut form = ada_form();

    let outcome = service
        .submit_package(&starter(), &mut form, None)
        .await
        .unwrap();

    assert_eq!(outcome.path, SubmissionPath::RedirectFailed);
    assert!(outcome.redirect_url().is_none());
    assert_eq!(form, ada_form());
    assert!(matches!(outcome.error, Some(SubmissionError::Redirect(_))));
    match outcome.write_error {
        Some(DatastoreError::ApiError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal error");
        }
        other => panic!("expected the write error, got {:?}", other),
    }

    let notification = harness.notifier.last().unwrap();
    assert!(notification.is_error());
    assert_eq!(
        notification.description,
        "Internal error. Please try again later."
    );
    assert!(service.can_submit_package());
}

#[tokio::test(start_paused = true)]
async fn test_blank_company_is_left_out() {
    let harness = Harness::new();
    let service = harness.service();
    let mut form = PackageForm {
        company: "   ".to_string(),
        ..ada_form()
    };

    let outcome = service
        .submit_package(&starter(), &mut form, None)
        .await
        .unwrap();

    let message = message_from_url(outcome.redirect_url().unwrap()).unwrap();
    assert!(!message.contains("Company"));
    assert!(harness.repository.package_inquiries()[0]
        .user_info
        .company
        .is_none());
}
