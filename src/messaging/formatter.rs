//! Turns validated inquiries into the text sent over WhatsApp.
//!
//! Messages use WhatsApp markdown (`*bold*`) and a fixed layout so the
//! business side can scan them quickly. Apart from the `Sent:` line the
//! output depends only on the input.

use crate::clock::{display_timestamp, Clock};
use crate::models::{ContactInquiry, ServicePackage, UserInfo};
use std::sync::Arc;

/// Formats inquiry messages, stamping them with the injected clock.
#[derive(Clone)]
pub struct MessageFormatter {
    clock: Arc<dyn Clock>,
    source_label: String,
}

impl MessageFormatter {
    /// Create a formatter. `source_label` names the site in the `Source:` line.
    pub fn new(clock: Arc<dyn Clock>, source_label: impl Into<String>) -> Self {
        Self {
            clock,
            source_label: source_label.into(),
        }
    }

    /// Message for a contact form submission.
    pub fn contact_message(&self, inquiry: &ContactInquiry) -> String {
        let mut message = String::from("🌟 *New Contact Inquiry from Website*\n\n");
        message.push_str(&format!("👤 *Name:* {}\n", inquiry.name()));
        message.push_str(&format!("📧 *Email:* {}\n", inquiry.email()));
        message.push_str(&format!("📋 *Subject:* {}\n\n", inquiry.subject()));
        message.push_str("💬 *Message:*\n");
        message.push_str(inquiry.message());
        message.push_str("\n\n");
        message.push_str(&self.footer("Contact Form"));
        message
    }

    /// Message for a package selection.
    ///
    /// The customer section is only written when `user` is given; optional
    /// fields that are empty are left out entirely.
    pub fn package_message(&self, package: &ServicePackage, user: Option<&UserInfo>) -> String {
        let mut message = String::from("🎯 *Package Selection from Website*\n\n");
        message.push_str(&format!("📦 *Selected Package:* {}\n", package.name));
        message.push_str(&format!("💰 *Price:* {}\n", package.price));
        message.push_str(&format!("📝 *Description:* {}\n\n", package.description));
        message.push_str("✨ *Included Features:*");

        for (index, feature) in package.features.iter().enumerate() {
            message.push_str(&format!("\n{}. {}", index + 1, feature));
        }

        if let Some(user) = user.filter(|user| !user.name().is_empty()) {
            message.push_str("\n\n👤 *Customer Information:*");
            message.push_str(&format!("\n• Name: {}", user.name()));
            if !user.email().as_str().is_empty() {
                message.push_str(&format!("\n• Email: {}", user.email()));
            }
            message.push_str(&format!("\n• Mobile: {}", user.mobile()));
            if let Some(company) = user.company() {
                message.push_str(&format!("\n• Company: {}", company));
            }
        }

        message.push_str("\n\n");
        message.push_str(&self.footer("Package Selection"));
        message.push_str(&format!(
            "\n\n💡 *Next Steps:*\nI'm interested in the {} package. Please provide more details \
             about the timeline, customization options, and next steps to get started.",
            package.name
        ));
        message
    }

    fn footer(&self, form_name: &str) -> String {
        format!(
            "---\n📅 *Sent:* {}\n🌐 *Source:* {} {}",
            display_timestamp(&self.clock.now()),
            self.source_label,
            form_name
        )
    }
}

impl std::fmt::Debug for MessageFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageFormatter")
            .field("source_label", &self.source_label)
            .finish()
    }
}
