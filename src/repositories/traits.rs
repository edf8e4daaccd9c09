use crate::client::WriteAck;
use crate::error::DatastoreResult;
use crate::models::{ContactRecord, PackageInquiryRecord};
use async_trait::async_trait;

/// Datastore path holding contact form submissions.
pub const CONTACTS_PATH: &str = "contacts";

/// Datastore path holding package inquiries.
pub const PACKAGE_INQUIRIES_PATH: &str = "package_inquiries";

/// Repository for persisting inquiries.
///
/// Provides abstraction over inquiry storage, enabling different
/// implementations (Realtime Database, mock).
#[async_trait]
pub trait InquiryRepository: Send + Sync {
    /// Store a contact form submission.
    async fn save_contact(&self, record: &ContactRecord) -> DatastoreResult<WriteAck>;

    /// Store a package inquiry.
    async fn save_package_inquiry(&self, record: &PackageInquiryRecord)
        -> DatastoreResult<WriteAck>;
}
