//! WhatsApp deep links.
//!
//! Both link variants carry the message in the `text` query parameter,
//! encoded the same way.

use crate::domain::RecipientId;
use std::string::FromUtf8Error;

const WEB_BASE: &str = "https://wa.me";
const APP_BASE: &str = "whatsapp://send";

/// Percent-encode a message for a WhatsApp `text` parameter.
///
/// Produces what a browser's `encodeURIComponent` does, except that `'`,
/// `(` and `)` are escaped too (`"` already is), since wa.me mangles them
/// otherwise.
pub fn encode_message(message: &str) -> String {
    // urlencoding also escapes ! and *, which encodeURIComponent leaves alone
    urlencoding::encode(message)
        .replace("%21", "!")
        .replace("%2A", "*")
}

/// Reverse [`encode_message`].
pub fn decode_message(encoded: &str) -> Result<String, FromUtf8Error> {
    urlencoding::decode(encoded).map(|decoded| decoded.into_owned())
}

/// A message addressed to a recipient, ready to be turned into a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagingLink {
    recipient: RecipientId,
    encoded_text: String,
}

impl MessagingLink {
    pub fn new(recipient: &RecipientId, message: &str) -> Self {
        Self {
            recipient: recipient.clone(),
            encoded_text: encode_message(message),
        }
    }

    /// `https://wa.me/<recipient>?text=<message>`
    pub fn web_url(&self) -> String {
        format!("{}/{}?text={}", WEB_BASE, self.recipient, self.encoded_text)
    }

    /// `whatsapp://send?phone=<recipient>&text=<message>`
    pub fn app_url(&self) -> String {
        format!(
            "{}?phone={}&text={}",
            APP_BASE, self.recipient, self.encoded_text
        )
    }

    pub fn encoded_text(&self) -> &str {
        &self.encoded_text
    }

    pub fn recipient(&self) -> &RecipientId {
        &self.recipient
    }
}

/// Pull the decoded `text` parameter back out of a web or app link.
pub fn message_from_url(url: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("text="))
        .and_then(|encoded| decode_message(encoded).ok())
}
