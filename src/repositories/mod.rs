mod datastore_inquiry_repository;
mod traits;

pub use datastore_inquiry_repository::DatastoreInquiryRepository;
pub use traits::{InquiryRepository, CONTACTS_PATH, PACKAGE_INQUIRIES_PATH};
