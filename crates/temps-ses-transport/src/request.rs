//! Mapping from an [`Email`] to the raw-send request the remote API expects

use lettre::message::Mailbox;
use serde::{Deserialize, Serialize};

use crate::errors::TransportError;
use crate::message::Email;

/// Raw message payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawMessage {
    /// Header block, a newline, then the body
    pub data: String,
}

/// Request for a raw email send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendRawEmailRequest {
    /// Envelope sender, `Name <address>`
    pub source: String,
    /// One `Name <address>` entry per `To` recipient
    pub destinations: Vec<String>,
    pub raw_message: RawMessage,
}

impl SendRawEmailRequest {
    /// Build the request for `email`.
    ///
    /// Only the first `From` mailbox becomes the source; a message without
    /// any sender is rejected. An empty `To` list is passed through as is and
    /// left for the remote API to refuse.
    pub fn from_email(email: &Email) -> Result<Self, TransportError> {
        let source = email
            .from()
            .first()
            .map(format_mailbox)
            .ok_or(TransportError::MissingSender)?;

        let destinations = email.to().iter().map(format_mailbox).collect();

        let data = format!("{}\n{}", email.rendered_headers(), email.body());

        Ok(Self {
            source,
            destinations,
            raw_message: RawMessage { data },
        })
    }
}

/// Format a mailbox as `Name <address>`, or the bare address when it has no
/// display name.
///
/// The display name is copied as is, unlike the header block where lettre
/// RFC 2047-encodes it. SES rejects a non-ASCII `FromEmailAddress`, so a
/// sender with such a name fails at the remote call.
pub fn format_mailbox(mailbox: &Mailbox) -> String {
    match mailbox.name.as_deref() {
        Some(name) if !name.is_empty() => format!("{} <{}>", name, mailbox.email),
        _ => mailbox.email.to_string(),
    }
}
