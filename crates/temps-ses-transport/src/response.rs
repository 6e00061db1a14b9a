//! Outcome of a single send attempt

use serde::{Deserialize, Serialize};

use crate::message::Email;

/// Success value returned by the remote raw-send call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRawEmailResponse {
    /// Provider's message ID
    pub message_id: String,
}

/// Pairs the message that was sent with what the remote API returned.
///
/// `aws_response` is `None` when the call failed before producing a value.
#[derive(Debug, Clone)]
pub struct ResponseRecord {
    message: Email,
    aws_response: Option<SendRawEmailResponse>,
}

impl ResponseRecord {
    pub fn new(message: Email, aws_response: Option<SendRawEmailResponse>) -> Self {
        Self {
            message,
            aws_response,
        }
    }

    pub fn message(&self) -> &Email {
        &self.message
    }

    pub fn aws_response(&self) -> Option<&SendRawEmailResponse> {
        self.aws_response.as_ref()
    }

    pub fn set_message(&mut self, message: Email) -> &mut Self {
        self.message = message;
        self
    }

    pub fn set_aws_response(&mut self, aws_response: Option<SendRawEmailResponse>) -> &mut Self {
        self.aws_response = aws_response;
        self
    }
}
