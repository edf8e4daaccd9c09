use async_trait::async_trait;
use inquiry_relay::client::WriteAck;
use inquiry_relay::error::{DatastoreError, DatastoreResult};
use inquiry_relay::models::{ContactRecord, PackageInquiryRecord};
use inquiry_relay::repositories::{InquiryRepository, CONTACTS_PATH, PACKAGE_INQUIRIES_PATH};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock inquiry repository for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockInquiryRepository {
    contacts: Arc<Mutex<Vec<ContactRecord>>>,
    package_inquiries: Arc<Mutex<Vec<PackageInquiryRecord>>>,
    failure: Arc<Mutex<Option<(u16, String)>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockInquiryRepository {
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(Vec::new())),
            package_inquiries: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Make every following write fail with an API error.
    pub fn fail_with(&self, status: u16, message: &str) {
        *self.failure.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn succeed(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn contacts(&self) -> Vec<ContactRecord> {
        self.contacts.lock().unwrap().clone()
    }

    pub fn package_inquiries(&self) -> Vec<PackageInquiryRecord> {
        self.package_inquiries.lock().unwrap().clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn check_failure(&self) -> DatastoreResult<()> {
        match self.failure.lock().unwrap().clone() {
            Some((status, message)) => Err(DatastoreError::ApiError { status, message }),
            None => Ok(()),
        }
    }
}

impl Default for MockInquiryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InquiryRepository for MockInquiryRepository {
    async fn save_contact(&self, record: &ContactRecord) -> DatastoreResult<WriteAck> {
        self.track_call("save_contact");
        self.check_failure()?;

        let mut contacts = self.contacts.lock().unwrap();
        contacts.push(record.clone());
        Ok(WriteAck {
            path: CONTACTS_PATH.to_string(),
            key: format!("-Ncontact{}", contacts.len()),
        })
    }

    async fn save_package_inquiry(
        &self,
        record: &PackageInquiryRecord,
    ) -> DatastoreResult<WriteAck> {
        self.track_call("save_package_inquiry");
        self.check_failure()?;

        let mut inquiries = self.package_inquiries.lock().unwrap();
        inquiries.push(record.clone());
        Ok(WriteAck {
            path: PACKAGE_INQUIRIES_PATH.to_string(),
            key: format!("-Npackage{}", inquiries.len()),
        })
    }
}
