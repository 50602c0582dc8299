//! Driven port for third-party recognition providers.
//!
//! Each adapter performs exactly one outbound call and hands back the
//! provider's JSON untouched. Interpreting that JSON is the normalizer's job.

use async_trait::async_trait;

use crate::domain::{ImagePayload, ProviderKind, ProviderOptions, ProviderRawReply};

use super::define_port_error;

define_port_error! {
    /// Errors raised by provider client adapters.
    pub enum ProviderClientError {
        /// The request never produced an HTTP response.
        Transport { message: String } => "provider transport failed: {message}",
        /// The provider did not answer within the configured timeout.
        Timeout { message: String } => "provider request timed out: {message}",
        /// The provider answered with a non-success status.
        Status { status: u16, body: String } =>
            "provider returned status {status}: {body}",
        /// The provider answered 2xx with a body that is not JSON.
        Decode { message: String, body: String } =>
            "provider response could not be decoded: {message}",
    }
}

impl ProviderClientError {
    /// Raw response body, when the provider sent one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } | Self::Decode { body, .. } => Some(body.as_str()),
            Self::Transport { .. } | Self::Timeout { .. } => None,
        }
    }

    /// HTTP status, when known.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Strategy for calling one recognition provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Which provider this client talks to.
    fn kind(&self) -> ProviderKind;

    /// Submit `image` and return the provider's raw reply.
    async fn identify(
        &self,
        image: &ImagePayload,
        options: &ProviderOptions,
    ) -> Result<ProviderRawReply, ProviderClientError>;
}
