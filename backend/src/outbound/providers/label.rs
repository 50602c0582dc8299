//! Google Vision label detection client.

use async_trait::async_trait;
use reqwest::Client;

use super::ProviderEndpoint;
use super::dto::AnnotateRequestDto;
use super::http_support::{build_client, encode_image, send_for_json};
use crate::domain::ports::{ProviderClient, ProviderClientError};
use crate::domain::{ImagePayload, ProviderKind, ProviderOptions, ProviderRawReply};

const MAX_LABELS: u32 = 5;

/// Label provider posting base64 images to `images:annotate`.
pub struct VisionLabelClient {
    client: Client,
    config: ProviderEndpoint,
}

impl VisionLabelClient {
    /// Build a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: ProviderEndpoint) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(&config)?,
            config,
        })
    }
}

#[async_trait]
impl ProviderClient for VisionLabelClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Label
    }

    async fn identify(
        &self,
        image: &ImagePayload,
        _options: &ProviderOptions,
    ) -> Result<ProviderRawReply, ProviderClientError> {
        let body = AnnotateRequestDto::label_detection(encode_image(image.as_bytes()), MAX_LABELS);
        let request = self
            .client
            .post(self.config.endpoint().clone())
            .query(&[("key", self.config.api_key())])
            .json(&body);
        send_for_json(self.kind(), request).await
    }
}
