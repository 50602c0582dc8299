//! Identification handlers.
//!
//! ```text
//! POST /identify           multipart: image, user_id?
//! POST /identify_openai    multipart: image, user_id?
//! POST /identify_plantnet  multipart: image, organs?, user_id?
//! ```
//!
//! When `user_id` is present the result is also appended to that user's
//! history.

use actix_multipart::Multipart;
use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{IdentificationResult, ProviderKind, ProviderOptions};
use crate::inbound::http::ApiResult;
use crate::inbound::http::multipart::read_upload;
use crate::inbound::http::schemas::{ErrorSchema, IdentifyUpload, PlantIdentifyUpload};
use crate::inbound::http::state::HttpState;

/// Identification result as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct IdentifyResponse {
    #[schema(example = "Rose")]
    pub name: String,
    /// Percentage with two decimals.
    #[schema(example = "87.00%")]
    pub confidence: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl From<IdentificationResult> for IdentifyResponse {
    fn from(result: IdentificationResult) -> Self {
        Self {
            name: result.name().to_owned(),
            confidence: result.confidence().to_string(),
            description: result.description().to_owned(),
            link: result.link().map(str::to_owned),
        }
    }
}

async fn identify_with(
    state: &HttpState,
    payload: Multipart,
    kind: ProviderKind,
) -> ApiResult<web::Json<IdentifyResponse>> {
    let mut form = read_upload(payload, state.max_image_bytes).await?;
    let user_id = form.user_id()?;
    let options = match (kind, form.text("organs")) {
        (ProviderKind::Botanical, Some(organs)) => ProviderOptions::with_organs(organs),
        _ => ProviderOptions::default(),
    };
    let image = form.take_image();

    let result = match user_id {
        Some(user_id) => {
            state
                .identification
                .run_and_save(image, kind, options, user_id)
                .await?
        }
        None => state.identification.run(image, kind, options).await?,
    };
    info!(
        provider = %kind,
        name = result.name(),
        confidence = result.confidence().value(),
        saved = user_id.is_some(),
        "identification complete"
    );
    Ok(web::Json(result.into()))
}

/// Identify an object with the label provider.
#[utoipa::path(
    post,
    path = "/identify",
    request_body(content = IdentifyUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Identification result", body = IdentifyResponse),
        (status = 400, description = "No image or malformed upload", body = ErrorSchema),
        (status = 503, description = "Provider not configured or storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["identification"],
    operation_id = "identifyLabel"
)]
#[post("/identify")]
pub async fn identify(
    state: web::Data<HttpState>,
    payload: Multipart,
) -> ApiResult<web::Json<IdentifyResponse>> {
    identify_with(&state, payload, ProviderKind::Label).await
}

/// Identify an object with the multimodal language model.
#[utoipa::path(
    post,
    path = "/identify_openai",
    request_body(content = IdentifyUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Identification result", body = IdentifyResponse),
        (status = 400, description = "No image or malformed upload", body = ErrorSchema),
        (status = 502, description = "Provider rejected the request", body = ErrorSchema),
        (status = 503, description = "Provider not configured or storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["identification"],
    operation_id = "identifyMultimodal"
)]
#[post("/identify_openai")]
pub async fn identify_openai(
    state: web::Data<HttpState>,
    payload: Multipart,
) -> ApiResult<web::Json<IdentifyResponse>> {
    identify_with(&state, payload, ProviderKind::Multimodal).await
}

/// Identify a plant with the botanical provider.
#[utoipa::path(
    post,
    path = "/identify_plantnet",
    request_body(content = PlantIdentifyUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Identification result", body = IdentifyResponse),
        (status = 400, description = "No image or malformed upload", body = ErrorSchema),
        (status = 503, description = "Provider not configured or storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["identification"],
    operation_id = "identifyBotanical"
)]
#[post("/identify_plantnet")]
pub async fn identify_plantnet(
    state: web::Data<HttpState>,
    payload: Multipart,
) -> ApiResult<web::Json<IdentifyResponse>> {
    identify_with(&state, payload, ProviderKind::Botanical).await
}

#[cfg(test)]
#[path = "identify_tests.rs"]
mod tests;
