//! Mail transport that hands messages to SES as raw sends

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, info};

use crate::client::{RawEmailClient, SesRawEmailClient};
use crate::config::SesTransportConfig;
use crate::debug::DebugSink;
use crate::errors::TransportError;
use crate::events::{
    EventDispatcher, HookOutcome, ListenerRegistry, SendResult, TransportListener,
};
use crate::message::Email;
use crate::request::SendRawEmailRequest;
use crate::response::{ResponseRecord, SendRawEmailResponse};

/// Name carried by every event this transport fires
pub const TRANSPORT_NAME: &str = "ses";

/// A transport sends composed messages somewhere
#[async_trait]
pub trait MailTransport: Send + Sync {
    fn is_started(&self) -> bool;

    async fn start(&self) -> Result<(), TransportError>;

    async fn stop(&self) -> Result<(), TransportError>;

    /// Send `message` and return the number of recipients accepted.
    ///
    /// Never fails: a failed send returns 0. When the remote API rejects the
    /// send, every `To` address is appended to `failed_recipients` if it is
    /// supplied. Failures while building the request leave it untouched.
    async fn send(&self, message: &Email, failed_recipients: Option<&mut Vec<String>>) -> usize;

    fn register_plugin(&self, listener: Arc<dyn TransportListener>);
}

/// SES-backed [`MailTransport`].
///
/// Each `send` makes exactly one remote call. The last response is kept in a
/// single slot that every send overwrites, so with several sends in flight on
/// the same instance [`SesTransport::last_response`] reflects whichever
/// finished last.
pub struct SesTransport {
    client: Arc<dyn RawEmailClient>,
    dispatcher: Arc<dyn EventDispatcher>,
    debug_sink: RwLock<DebugSink>,
    last_response: Mutex<Option<ResponseRecord>>,
}

impl SesTransport {
    pub fn new(client: Arc<dyn RawEmailClient>) -> Self {
        Self::with_dispatcher(client, Arc::new(ListenerRegistry::new()), DebugSink::Off)
    }

    pub fn with_dispatcher(
        client: Arc<dyn RawEmailClient>,
        dispatcher: Arc<dyn EventDispatcher>,
        debug_sink: DebugSink,
    ) -> Self {
        Self {
            client,
            dispatcher,
            debug_sink: RwLock::new(debug_sink),
            last_response: Mutex::new(None),
        }
    }

    /// Build the SES client from `config` and wrap it
    pub async fn from_config(config: &SesTransportConfig) -> Result<Self, TransportError> {
        let client = SesRawEmailClient::from_config(config).await?;
        info!("SES transport ready for region {}", config.region);

        Ok(Self::with_dispatcher(
            Arc::new(client),
            Arc::new(ListenerRegistry::new()),
            config.debug_sink(),
        ))
    }

    /// Replace the debug sink. Takes effect for sends started afterwards.
    pub fn set_debug_sink(&self, sink: DebugSink) {
        *self
            .debug_sink
            .write()
            .unwrap_or_else(PoisonError::into_inner) = sink;
    }

    pub fn debug_sink(&self) -> DebugSink {
        self.debug_sink
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Record of the most recent send attempt
    pub fn last_response(&self) -> Option<ResponseRecord> {
        self.last_response
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn perform_send(&self, message: &Email) -> Result<SendRawEmailResponse, TransportError> {
        let request = SendRawEmailRequest::from_email(message)?;
        self.client.send_raw_email(&request).await
    }
}

#[async_trait]
impl MailTransport for SesTransport {
    // The SDK client owns any connection state.
    fn is_started(&self) -> bool {
        false
    }

    async fn start(&self) -> Result<(), TransportError> {
        Ok(())
    }

    async fn stop(&self) -> Result<(), TransportError> {
        Ok(())
    }

    async fn send(&self, message: &Email, failed_recipients: Option<&mut Vec<String>>) -> usize {
        let mut send_event = self.dispatcher.create_send_event(TRANSPORT_NAME, message);

        if let Some(ref event) = send_event {
            if self.dispatcher.dispatch_before_send(event) == HookOutcome::Cancel {
                debug!("Send cancelled by a before-send listener");
                return 0;
            }
        }

        let (success, response) = match self.perform_send(message).await {
            Ok(response) => {
                debug!("SES accepted message {}", response.message_id);
                (true, Some(response))
            }
            Err(e) => {
                debug!("SES send failed: {}", e);
                self.debug_sink().emit(&e.to_string());
                if e.is_remote() {
                    if let Some(failed) = failed_recipients {
                        failed.extend(message.to().iter().map(|m| m.email.to_string()));
                    }
                }
                (false, None)
            }
        };

        let record = ResponseRecord::new(message.clone(), response);
        *self
            .last_response
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(record.clone());

        if let Some(event) = self
            .dispatcher
            .create_response_event(TRANSPORT_NAME, &record, success)
        {
            self.dispatcher.dispatch_response_received(&event);
        }

        if let Some(ref mut event) = send_event {
            event.set_result(if success {
                SendResult::Success
            } else {
                SendResult::Failed
            });
            self.dispatcher.dispatch_send_performed(event);
        }

        if success {
            message.to().len()
        } else {
            0
        }
    }

    fn register_plugin(&self, listener: Arc<dyn TransportListener>) {
        self.dispatcher.bind_listener(listener);
    }
}
