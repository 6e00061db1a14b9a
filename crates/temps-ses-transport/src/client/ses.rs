//! AWS SES raw-send client

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sesv2::{
    config::{Credentials, Region},
    error::{ProvideErrorMetadata, SdkError},
    primitives::Blob,
    types::{Destination, EmailContent, RawMessage},
    Client,
};
use tracing::{debug, error};

use super::RawEmailClient;
use crate::config::SesTransportConfig;
use crate::errors::TransportError;
use crate::request::SendRawEmailRequest;
use crate::response::SendRawEmailResponse;

/// Describe a failed raw send. Service rejections carry the SES error code
/// (e.g. `MessageRejected`, `MailFromDomainNotVerifiedException`) so the
/// debug sink shows why SES refused the message.
fn describe_send_failure<E, R>(e: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + std::fmt::Display + std::fmt::Debug,
    R: std::fmt::Debug,
{
    match e {
        SdkError::ServiceError(service_err) => {
            let err = service_err.err();
            let code = err.code().unwrap_or("Unknown");
            match err.message() {
                Some(message) => format!("SES rejected raw send [{}]: {}", code, message),
                None => format!("SES rejected raw send [{}]: {}", code, err),
            }
        }
        SdkError::TimeoutError(_) => "Raw send to SES timed out".to_string(),
        SdkError::DispatchFailure(dispatch_err) => {
            if dispatch_err.is_io() {
                "Could not reach the SES endpoint".to_string()
            } else if dispatch_err.is_timeout() {
                "Connection to the SES endpoint timed out".to_string()
            } else {
                format!("Raw send was not dispatched: {:?}", dispatch_err)
            }
        }
        SdkError::ConstructionFailure(_) => {
            "Raw send request could not be built from the message envelope".to_string()
        }
        SdkError::ResponseError(resp_err) => {
            format!("Unreadable SES response to raw send: {:?}", resp_err)
        }
        _ => format!("Raw send failed: {:?}", e),
    }
}

/// Sends raw MIME messages through SES `SendEmail` with raw content
pub struct SesRawEmailClient {
    client: Client,
    configuration_set_name: Option<String>,
}

impl SesRawEmailClient {
    /// Wrap an already configured SDK client
    pub fn new(client: Client) -> Self {
        Self {
            client,
            configuration_set_name: None,
        }
    }

    /// Build the SDK client from configuration
    pub async fn from_config(config: &SesTransportConfig) -> Result<Self, TransportError> {
        config.validate()?;

        let mut config_builder = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let Some(ref creds) = config.credentials {
            config_builder = config_builder.credentials_provider(Credentials::new(
                &creds.access_key_id,
                &creds.secret_access_key,
                None,
                None,
                "temps-ses-transport",
            ));
        }

        if let Some(ref endpoint_url) = config.endpoint_url {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        let sdk_config = config_builder.load().await;
        debug!("Created SES client for region {}", config.region);

        Ok(Self {
            client: Client::new(&sdk_config),
            configuration_set_name: config.configuration_set_name.clone(),
        })
    }

    pub fn with_configuration_set(mut self, name: impl Into<String>) -> Self {
        self.configuration_set_name = Some(name.into());
        self
    }

    pub fn configuration_set_name(&self) -> Option<&str> {
        self.configuration_set_name.as_deref()
    }
}

#[async_trait]
impl RawEmailClient for SesRawEmailClient {
    async fn send_raw_email(
        &self,
        request: &SendRawEmailRequest,
    ) -> Result<SendRawEmailResponse, TransportError> {
        debug!(
            "Sending raw email via SES from: {} to {} destination(s)",
            request.source,
            request.destinations.len()
        );

        let destination = Destination::builder()
            .set_to_addresses(Some(request.destinations.clone()))
            .build();

        let raw = RawMessage::builder()
            .data(Blob::new(request.raw_message.data.as_bytes().to_vec()))
            .build()
            .map_err(|e| TransportError::Request(format!("Failed to build raw message: {}", e)))?;

        let mut send_request = self
            .client
            .send_email()
            .from_email_address(&request.source)
            .destination(destination)
            .content(EmailContent::builder().raw(raw).build());

        if let Some(ref name) = self.configuration_set_name {
            send_request = send_request.configuration_set_name(name);
        }

        let result = send_request.send().await.map_err(|e| {
            let error_message = describe_send_failure(&e);
            error!("Failed to send raw email via SES: {}", error_message);
            TransportError::AwsSes(error_message)
        })?;

        let message_id = result
            .message_id()
            .ok_or_else(|| TransportError::AwsSes("No message ID returned".to_string()))?
            .to_string();

        debug!("Raw email sent, message_id: {}", message_id);

        Ok(SendRawEmailResponse { message_id })
    }
}
