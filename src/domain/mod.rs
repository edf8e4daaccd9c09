//! Domain value objects and types.
//!
//! Type-safe wrappers for the values that cross the pipeline boundary:
//! email addresses, mobile numbers and the WhatsApp recipient. They are
//! validated at construction so invalid data never reaches the datastore
//! or a deep link.

pub mod email;
pub mod errors;
pub mod phone;
pub mod recipient;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use phone::MobileNumber;
pub use recipient::RecipientId;
