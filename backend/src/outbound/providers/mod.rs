//! Reqwest-backed recognition provider clients.
//!
//! One module per provider. Each owns its wire format only; interpreting the
//! reply is left to [`crate::domain::normalizer`].

mod botanical;
mod dto;
mod http_support;
mod label;
mod multimodal;

use std::time::Duration;

use reqwest::Url;
use zeroize::Zeroizing;

pub use botanical::PlantNetClient;
pub use label::VisionLabelClient;
pub use multimodal::{DEFAULT_OPENAI_MODEL, OpenAiVisionClient};

/// Default upstream call timeout.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Endpoint, credential and timeout for one provider.
pub struct ProviderEndpoint {
    endpoint: Url,
    api_key: Zeroizing<String>,
    timeout: Duration,
}

impl ProviderEndpoint {
    /// Describe a provider endpoint.
    pub fn new(endpoint: Url, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint,
            api_key: Zeroizing::new(api_key.into()),
            timeout,
        }
    }

    pub(crate) fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub(crate) fn api_key(&self) -> &str {
        self.api_key.as_str()
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for ProviderEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderEndpoint")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
