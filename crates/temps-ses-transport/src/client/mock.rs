//! Mock raw-send client for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::RawEmailClient;
use crate::errors::TransportError;
use crate::request::SendRawEmailRequest;
use crate::response::SendRawEmailResponse;

/// Mock client that records every request it receives
#[derive(Debug, Clone)]
pub struct MockRawEmailClient {
    pub send_count: Arc<AtomicUsize>,
    pub requests: Arc<Mutex<Vec<SendRawEmailRequest>>>,

    /// Configurable responses
    pub should_fail_send: bool,
    pub message_id: String,
}

impl Default for MockRawEmailClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRawEmailClient {
    pub fn new() -> Self {
        Self {
            send_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            should_fail_send: false,
            message_id: "mock-message-id".to_string(),
        }
    }

    pub fn with_send_failure(mut self) -> Self {
        self.should_fail_send = true;
        self
    }

    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = message_id.into();
        self
    }

    pub fn send_call_count(&self) -> usize {
        self.send_count.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SendRawEmailRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl RawEmailClient for MockRawEmailClient {
    async fn send_raw_email(
        &self,
        request: &SendRawEmailRequest,
    ) -> Result<SendRawEmailResponse, TransportError> {
        self.send_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if self.should_fail_send {
            return Err(TransportError::AwsSes("Mock send failure".to_string()));
        }

        Ok(SendRawEmailResponse {
            message_id: self.message_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RawMessage;

    fn request() -> SendRawEmailRequest {
        SendRawEmailRequest {
            source: "A <a@x.com>".to_string(),
            destinations: vec!["B <b@y.com>".to_string()],
            raw_message: RawMessage {
                data: "Subject: hi\r\n\nbody".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_mock_client_records_requests() {
        let client = MockRawEmailClient::new().with_message_id("abc");

        let response = client.send_raw_email(&request()).await.unwrap();

        assert_eq!(response.message_id, "abc");
        assert_eq!(client.send_call_count(), 1);
        assert_eq!(client.last_request().unwrap().source, "A <a@x.com>");
    }

    #[tokio::test]
    async fn test_mock_client_failure() {
        let client = MockRawEmailClient::new().with_send_failure();

        let result = client.send_raw_email(&request()).await;

        assert!(matches!(result, Err(TransportError::AwsSes(_))));
        assert_eq!(client.send_call_count(), 1);
    }
}
