//! Pl@ntNet identification client.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};

use super::ProviderEndpoint;
use super::http_support::{build_client, send_for_json};
use crate::domain::ports::{ProviderClient, ProviderClientError};
use crate::domain::{ImagePayload, ProviderKind, ProviderOptions, ProviderRawReply};

const IMAGE_PART: &str = "images";
const ORGANS_PART: &str = "organs";
const IMAGE_FILENAME: &str = "capture.jpg";
const IMAGE_MIME: &str = "image/jpeg";

/// Botanical provider uploading the photo as multipart form data.
pub struct PlantNetClient {
    client: Client,
    config: ProviderEndpoint,
}

impl PlantNetClient {
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

fn build_form(
    image: &ImagePayload,
    options: &ProviderOptions,
) -> Result<Form, ProviderClientError> {
    let part = Part::bytes(image.as_bytes().to_vec())
        .file_name(IMAGE_FILENAME)
        .mime_str(IMAGE_MIME)
        .map_err(|err| ProviderClientError::transport(format!("invalid image part: {err}")))?;
    Ok(Form::new()
        .part(IMAGE_PART, part)
        .text(ORGANS_PART, options.organs().to_owned()))
}

#[async_trait]
impl ProviderClient for PlantNetClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Botanical
    }

    async fn identify(
        &self,
        image: &ImagePayload,
        options: &ProviderOptions,
    ) -> Result<ProviderRawReply, ProviderClientError> {
        let request = self
            .client
            .post(self.config.endpoint().clone())
            .query(&[("api-key", self.config.api_key())])
            .multipart(build_form(image, options)?);
        send_for_json(self.kind(), request).await
    }
}
