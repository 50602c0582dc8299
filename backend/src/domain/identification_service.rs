//! Identification pipeline service.
//!
//! Validates the upload, dispatches it to exactly one provider, normalises the
//! reply and optionally appends the result to the caller's history. Provider
//! outages degrade to the provider's fallback result; explicit provider API
//! errors and persistence failures are surfaced.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::domain::normalizer::{NormalizeError, normalize, upstream_error_message};
use crate::domain::ports::{
    CaptureStore, CaptureStoreError, IdentificationPipeline, ProviderClient, ProviderClientError,
};
use crate::domain::{
    CaptureRecord, Error, IdentificationResult, ImagePayload, ProviderKind, ProviderOptions,
    UserId,
};

pub(crate) fn map_capture_store_error(error: CaptureStoreError) -> Error {
    error!(%error, "capture store failure");
    match error {
        CaptureStoreError::Connection { message } => {
            Error::service_unavailable(format!("capture store unavailable: {message}"))
        }
        CaptureStoreError::Query { message } => {
            Error::internal(format!("capture store error: {message}"))
        }
    }
}

/// Service implementing [`IdentificationPipeline`] over a provider registry.
pub struct IdentificationService<S: ?Sized> {
    providers: HashMap<ProviderKind, Arc<dyn ProviderClient>>,
    capture_store: Arc<S>,
}

impl<S: ?Sized> IdentificationService<S> {
    /// Create a service with no providers registered.
    pub fn new(capture_store: Arc<S>) -> Self {
        Self {
            providers: HashMap::new(),
            capture_store,
        }
    }

    /// Register `client` under its own [`ProviderKind`], replacing any
    /// previous client of that kind.
    #[must_use]
    pub fn with_provider(mut self, client: Arc<dyn ProviderClient>) -> Self {
        self.providers.insert(client.kind(), client);
        self
    }

    async fn identify(
        &self,
        image: &ImagePayload,
        kind: ProviderKind,
        options: &ProviderOptions,
    ) -> Result<Identification, Error> {
        let client = self.providers.get(&kind).ok_or_else(|| {
            Error::service_unavailable(format!("{kind} provider is not configured"))
        })?;

        debug!(provider = %kind, bytes = image.len(), "dispatching identification request");
        match client.identify(image, options).await {
            Ok(raw) => {
                debug!(provider = %kind, reply = %raw, "provider reply received");
                normalize(kind, &raw)
                    .map(Identification::Identified)
                    .map_err(|err| match err {
                        NormalizeError::UpstreamApi { message } => Error::upstream(message),
                    })
            }
            Err(err) => absorb_provider_failure(kind, &err),
        }
    }
}

/// Outcome of a single provider dispatch.
#[derive(Debug)]
enum Identification {
    /// The provider answered and the reply was normalised.
    Identified(IdentificationResult),
    /// The provider could not be reached; this is the fallback result.
    Fallback(IdentificationResult),
}

impl Identification {
    fn into_result(self) -> IdentificationResult {
        match self {
            Self::Identified(result) | Self::Fallback(result) => result,
        }
    }
}

fn absorb_provider_failure(
    kind: ProviderKind,
    err: &ProviderClientError,
) -> Result<Identification, Error> {
    if kind == ProviderKind::Multimodal {
        let envelope = err
            .body()
            .and_then(|body| serde_json::from_str::<Value>(body).ok())
            .and_then(|body| upstream_error_message(&body));
        if let Some(message) = envelope {
            warn!(
                provider = %kind,
                status = ?err.http_status(),
                %message,
                "provider rejected request"
            );
            return Err(Error::upstream(message));
        }
    }

    warn!(provider = %kind, error = %err, "provider call failed; returning fallback result");
    Ok(Identification::Fallback(IdentificationResult::fallback(kind)))
}

fn validate_image(image: Vec<u8>) -> Result<ImagePayload, Error> {
    ImagePayload::try_new(image).map_err(|err| Error::invalid_request(err.to_string()))
}

#[async_trait]
impl<S> IdentificationPipeline for IdentificationService<S>
where
    S: CaptureStore + ?Sized,
{
    async fn run(
        &self,
        image: Vec<u8>,
        kind: ProviderKind,
        options: ProviderOptions,
    ) -> Result<IdentificationResult, Error> {
        let image = validate_image(image)?;
        Ok(self.identify(&image, kind, &options).await?.into_result())
    }

    async fn run_and_save(
        &self,
        image: Vec<u8>,
        kind: ProviderKind,
        options: ProviderOptions,
        user_id: UserId,
    ) -> Result<IdentificationResult, Error> {
        let image = validate_image(image)?;
        let result = match self.identify(&image, kind, &options).await? {
            Identification::Identified(result) => result,
            Identification::Fallback(result) => {
                warn!(provider = %kind, %user_id, "provider unavailable; capture not saved");
                return Ok(result);
            }
        };

        let record = CaptureRecord::new(user_id, image.into_bytes(), result.clone());
        self.capture_store
            .save(&record)
            .await
            .map_err(map_capture_store_error)?;
        debug!(provider = %kind, %user_id, name = result.name(), "saved identification");
        Ok(result)
    }
}

#[cfg(test)]
#[path = "identification_service_tests.rs"]
mod tests;
