use crate::client::{Datastore, WriteAck};
use crate::error::DatastoreResult;
use crate::models::{ContactRecord, PackageInquiryRecord};
use crate::repositories::traits::{InquiryRepository, CONTACTS_PATH, PACKAGE_INQUIRIES_PATH};
use async_trait::async_trait;
use std::sync::Arc;

/// Inquiry repository backed by a [`Datastore`].
///
/// Each inquiry type lives under its own fixed path; records are only ever
/// appended.
pub struct DatastoreInquiryRepository {
    datastore: Arc<dyn Datastore>,
}

impl DatastoreInquiryRepository {
    /// Create a new repository writing through the given datastore.
    pub fn new(datastore: Arc<dyn Datastore>) -> Self {
        Self { datastore }
    }
}

#[async_trait]
impl InquiryRepository for DatastoreInquiryRepository {
    async fn save_contact(&self, record: &ContactRecord) -> DatastoreResult<WriteAck> {
        let value = serde_json::to_value(record)?;
        self.datastore.write(CONTACTS_PATH, value).await
    }

    async fn save_package_inquiry(
        &self,
        record: &PackageInquiryRecord,
    ) -> DatastoreResult<WriteAck> {
        let value = serde_json::to_value(record)?;
        self.datastore.write(PACKAGE_INQUIRIES_PATH, value).await
    }
}
