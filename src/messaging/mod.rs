//! WhatsApp hand-off: message formatting, deep links, and launching.

pub mod formatter;
pub mod launcher;
pub mod link;

pub use formatter::MessageFormatter;
pub use launcher::{is_mobile_user_agent, LaunchOutcome, Launcher, Navigator};
pub use link::{decode_message, encode_message, MessagingLink};
