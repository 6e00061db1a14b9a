//! Send lifecycle events and the listeners that observe them.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::message::Email;
use crate::response::ResponseRecord;

/// Result code carried by a [`SendEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendResult {
    /// Send has not completed yet
    Pending,
    Success,
    Failed,
}

impl SendResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            SendResult::Pending => "pending",
            SendResult::Success => "success",
            SendResult::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SendResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a before-send listener wants to happen next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    Proceed,
    /// Abort the send; no remote call is made and no further events fire
    Cancel,
}

/// Fired before the remote call and again once it has completed
#[derive(Debug, Clone)]
pub struct SendEvent<'a> {
    transport: &'static str,
    message: &'a Email,
    result: SendResult,
}

impl<'a> SendEvent<'a> {
    pub fn new(transport: &'static str, message: &'a Email) -> Self {
        Self {
            transport,
            message,
            result: SendResult::Pending,
        }
    }

    pub fn transport(&self) -> &'static str {
        self.transport
    }

    pub fn message(&self) -> &'a Email {
        self.message
    }

    pub fn result(&self) -> SendResult {
        self.result
    }

    pub fn set_result(&mut self, result: SendResult) {
        self.result = result;
    }
}

/// Fired once per send attempt with the outcome of the remote call
#[derive(Debug, Clone)]
pub struct ResponseEvent<'a> {
    transport: &'static str,
    record: &'a ResponseRecord,
    success: bool,
}

impl<'a> ResponseEvent<'a> {
    pub fn new(transport: &'static str, record: &'a ResponseRecord, success: bool) -> Self {
        Self {
            transport,
            record,
            success,
        }
    }

    pub fn transport(&self) -> &'static str {
        self.transport
    }

    pub fn record(&self) -> &'a ResponseRecord {
        self.record
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

/// Observer of the send lifecycle. Every hook defaults to a no-op.
pub trait TransportListener: Send + Sync {
    fn before_send_performed(&self, _event: &SendEvent<'_>) -> HookOutcome {
        HookOutcome::Proceed
    }

    fn response_received(&self, _event: &ResponseEvent<'_>) {}

    fn send_performed(&self, _event: &SendEvent<'_>) {}
}

/// Creates lifecycle events and delivers them to listeners.
///
/// Returning `None` from one of the `create_*` methods suppresses that event
/// entirely.
pub trait EventDispatcher: Send + Sync {
    fn create_send_event<'a>(
        &self,
        transport: &'static str,
        message: &'a Email,
    ) -> Option<SendEvent<'a>> {
        Some(SendEvent::new(transport, message))
    }

    fn create_response_event<'a>(
        &self,
        transport: &'static str,
        record: &'a ResponseRecord,
        success: bool,
    ) -> Option<ResponseEvent<'a>> {
        Some(ResponseEvent::new(transport, record, success))
    }

    fn dispatch_before_send(&self, event: &SendEvent<'_>) -> HookOutcome;

    fn dispatch_response_received(&self, event: &ResponseEvent<'_>);

    fn dispatch_send_performed(&self, event: &SendEvent<'_>);

    fn bind_listener(&self, listener: Arc<dyn TransportListener>);
}

/// Default dispatcher: calls listeners in registration order
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: RwLock<Vec<Arc<dyn TransportListener>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Listeners run outside the lock so they may register further listeners.
    fn snapshot(&self) -> Vec<Arc<dyn TransportListener>> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EventDispatcher for ListenerRegistry {
    fn dispatch_before_send(&self, event: &SendEvent<'_>) -> HookOutcome {
        for (index, listener) in self.snapshot().iter().enumerate() {
            if listener.before_send_performed(event) == HookOutcome::Cancel {
                debug!("Listener #{} cancelled send on {}", index, event.transport());
                return HookOutcome::Cancel;
            }
        }
        HookOutcome::Proceed
    }

    fn dispatch_response_received(&self, event: &ResponseEvent<'_>) {
        for listener in self.snapshot() {
            listener.response_received(event);
        }
    }

    fn dispatch_send_performed(&self, event: &SendEvent<'_>) {
        for listener in self.snapshot() {
            listener.send_performed(event);
        }
    }

    fn bind_listener(&self, listener: Arc<dyn TransportListener>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}
