//! Remote client abstraction and the AWS SES implementation

mod ses;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

use crate::errors::TransportError;
use crate::request::SendRawEmailRequest;
use crate::response::SendRawEmailResponse;

pub use ses::SesRawEmailClient;

#[cfg(test)]
pub use mock::MockRawEmailClient;

/// Performs the actual network call for a raw email send
#[async_trait]
pub trait RawEmailClient: Send + Sync {
    async fn send_raw_email(
        &self,
        request: &SendRawEmailRequest,
    ) -> Result<SendRawEmailResponse, TransportError>;
}
