//! SES mail transport for Temps
//!
//! Hands composed messages to AWS SES as raw sends:
//! - Maps a message to a raw-send request (first sender as source, one
//!   destination per `To` recipient, headers + body as raw data)
//! - Performs exactly one remote call per send, no retries
//! - Notifies listeners before the send, on response and after the send
//! - Keeps the last response record for inspection

pub mod client;
pub mod config;
pub mod debug;
pub mod errors;
pub mod events;
pub mod message;
pub mod request;
pub mod response;
pub mod transport;

// Re-export main types
pub use client::{RawEmailClient, SesRawEmailClient};
pub use config::{SesCredentials, SesTransportConfig};
pub use debug::DebugSink;
pub use errors::TransportError;
pub use events::{
    EventDispatcher, HookOutcome, ListenerRegistry, ResponseEvent, SendEvent, SendResult,
    TransportListener,
};
pub use lettre::message::Mailbox;
pub use message::{Email, EmailBuilder};
pub use request::{RawMessage, SendRawEmailRequest};
pub use response::{ResponseRecord, SendRawEmailResponse};
pub use transport::{MailTransport, SesTransport, TRANSPORT_NAME};
