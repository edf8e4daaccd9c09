mod mock_inquiry_repository;
mod recording_analytics;
mod recording_navigator;
mod recording_notifier;

pub use mock_inquiry_repository::MockInquiryRepository;
pub use recording_analytics::RecordingAnalytics;
pub use recording_navigator::{NavigationKind, RecordingNavigator};
pub use recording_notifier::RecordingNotifier;
