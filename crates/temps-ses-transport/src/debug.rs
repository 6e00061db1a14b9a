//! Where transport failure descriptions go

use std::fmt;
use std::sync::Arc;

use tracing::warn;

/// Debug sink for failure descriptions produced during a send
#[derive(Clone, Default)]
pub enum DebugSink {
    /// Discard
    #[default]
    Off,
    /// Write to the process log through `tracing`
    Log,
    /// Hand each description to a callback
    Custom(Arc<dyn Fn(&str) + Send + Sync>),
}

impl DebugSink {
    pub fn custom<F>(callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        DebugSink::Custom(Arc::new(callback))
    }

    pub fn emit(&self, message: &str) {
        match self {
            DebugSink::Off => {}
            DebugSink::Log => warn!(target: "temps_ses_transport::debug", "{}", message),
            DebugSink::Custom(callback) => callback(message),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, DebugSink::Off)
    }
}

impl fmt::Debug for DebugSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebugSink::Off => write!(f, "Off"),
            DebugSink::Log => write!(f, "Log"),
            DebugSink::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}
