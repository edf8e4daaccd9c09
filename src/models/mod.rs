//! Data models for inquiries.
//!
//! Raw form input, the validated inquiries built from it, and the records
//! written to the datastore.

pub mod contact;
pub mod forms;
pub mod package;

pub use contact::{ContactInquiry, ContactRecord};
pub use forms::{ContactForm, PackageForm};
pub use package::{PackageInquiry, PackageInquiryRecord, ServicePackage, UserInfo, UserInfoRecord};
