//! Error types for the SES transport

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Message has no sender address")]
    MissingSender,

    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] lettre::address::AddressError),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("AWS SES error: {0}")]
    AwsSes(String),

    #[error("Request error: {0}")]
    Request(String),
}

impl TransportError {
    /// Whether the error came back from the remote API rather than from
    /// building the request locally
    pub fn is_remote(&self) -> bool {
        matches!(self, TransportError::AwsSes(_))
    }
}
