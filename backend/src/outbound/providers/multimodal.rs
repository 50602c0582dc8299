//! OpenAI chat completions client with an image part.

use async_trait::async_trait;
use reqwest::Client;

use super::ProviderEndpoint;
use super::dto::ChatRequestDto;
use super::http_support::{build_client, encode_image, send_for_json};
use crate::domain::ports::{ProviderClient, ProviderClientError};
use crate::domain::{ImagePayload, ProviderKind, ProviderOptions, ProviderRawReply};

/// Default chat model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

const MAX_TOKENS: u32 = 300;
const QUESTION: &str = "Identify this object.";
const SYSTEM_PROMPT: &str = "You are an AI assistant that identifies objects in images.
You must return the response in strict JSON format with no markdown formatting.
The JSON object must have these keys:
- \"name\": A short name of the object.
- \"confidence\": An estimated confidence percentage (e.g., \"95%\").
- \"description\": A 2-sentence description of the object.
- \"link\": A generic shopping link for the item (e.g., amazon search) or null if not applicable.";

/// Multimodal provider asking a chat model for a JSON identification.
pub struct OpenAiVisionClient {
    client: Client,
    config: ProviderEndpoint,
    model: String,
}

impl OpenAiVisionClient {
    /// Build a client for `model`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: ProviderEndpoint, model: impl Into<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(&config)?,
            config,
            model: model.into(),
        })
    }

    fn request_body(&self, image: &ImagePayload) -> ChatRequestDto<'_> {
        let data_url = format!("data:image/jpeg;base64,{}", encode_image(image.as_bytes()));
        ChatRequestDto::image_question(&self.model, SYSTEM_PROMPT, QUESTION, data_url, MAX_TOKENS)
    }
}

#[async_trait]
impl ProviderClient for OpenAiVisionClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Multimodal
    }

    async fn identify(
        &self,
        image: &ImagePayload,
        _options: &ProviderOptions,
    ) -> Result<ProviderRawReply, ProviderClientError> {
        let request = self
            .client
            .post(self.config.endpoint().clone())
            .bearer_auth(self.config.api_key())
            .json(&self.request_body(image));
        send_for_json(self.kind(), request).await
    }
}
