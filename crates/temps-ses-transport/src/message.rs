//! Outgoing email message consumed by the transport

use lettre::message::header::{self, HeaderName, HeaderValue, Headers};
use lettre::message::{Mailbox, Mailboxes};

use crate::errors::TransportError;

/// A composed email: sender and recipient lists, header block and body.
///
/// The `From` and `To` lists are also written into the header block by
/// [`EmailBuilder::body`].
#[derive(Debug, Clone)]
pub struct Email {
    from: Vec<Mailbox>,
    to: Vec<Mailbox>,
    headers: Headers,
    body: String,
}

impl Email {
    pub fn builder() -> EmailBuilder {
        EmailBuilder::default()
    }

    /// Sender mailboxes in insertion order
    pub fn from(&self) -> &[Mailbox] {
        &self.from
    }

    /// Recipient mailboxes in insertion order
    pub fn to(&self) -> &[Mailbox] {
        &self.to
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Header block as it goes on the wire
    pub fn rendered_headers(&self) -> String {
        self.headers.to_string()
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Builder for [`Email`]
#[derive(Debug, Default)]
pub struct EmailBuilder {
    from: Vec<Mailbox>,
    to: Vec<Mailbox>,
    subject: Option<String>,
    extra: Vec<HeaderValue>,
}

impl EmailBuilder {
    /// Add a sender. Only the first one is used as the envelope source.
    pub fn from(mut self, mailbox: Mailbox) -> Self {
        self.from.push(mailbox);
        self
    }

    pub fn to(mut self, mailbox: Mailbox) -> Self {
        self.to.push(mailbox);
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Add an arbitrary header, e.g. `X-SES-CONFIGURATION-SET`
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Result<Self, TransportError> {
        let header_name = HeaderName::new_from_ascii(name.to_string())
            .map_err(|_| TransportError::InvalidHeader(name.to_string()))?;
        self.extra.push(HeaderValue::new(header_name, value.into()));
        Ok(self)
    }

    pub fn body(self, body: impl Into<String>) -> Email {
        let mut headers = Headers::new();
        if !self.from.is_empty() {
            headers.set(header::From::from(to_mailboxes(&self.from)));
        }
        if !self.to.is_empty() {
            headers.set(header::To::from(to_mailboxes(&self.to)));
        }
        if let Some(subject) = self.subject {
            headers.set(header::Subject::from(subject));
        }
        for value in self.extra {
            headers.insert_raw(value);
        }

        Email {
            from: self.from,
            to: self.to,
            headers,
            body: body.into(),
        }
    }
}

fn to_mailboxes(list: &[Mailbox]) -> Mailboxes {
    list.iter()
        .cloned()
        .fold(Mailboxes::new(), |mailboxes, mailbox| mailboxes.with(mailbox))
}
