//! Capture history handlers.
//!
//! ```text
//! POST /saveResult      multipart: image, object_name, confidence, description, buy_link?, user_id
//! POST /getUserHistory  form: user_id
//! ```

use actix_multipart::Multipart;
use actix_web::{post, web};
use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::ports::SaveCaptureRequest;
use crate::domain::{CaptureRecord, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::multipart::{parse_user_id, read_upload};
use crate::inbound::http::schemas::{ErrorSchema, SaveResultUpload};
use crate::inbound::http::state::HttpState;

/// Acknowledgement for a saved capture.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct SaveResultResponse {
    pub success: bool,
}

/// Form body for `POST /getUserHistory`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct HistoryForm {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// One saved capture, newest first in the response list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HistoryItem {
    pub name: String,
    /// Stored percentage as a number.
    #[schema(example = 87.0)]
    pub confidence: f64,
    pub description: String,
    pub link: Option<String>,
    /// Standard base64 of the stored image bytes.
    pub image_base64: String,
}

impl From<&CaptureRecord> for HistoryItem {
    fn from(record: &CaptureRecord) -> Self {
        let result = record.result();
        Self {
            name: result.name().to_owned(),
            confidence: result.confidence().value(),
            description: result.description().to_owned(),
            link: result.link().map(str::to_owned),
            image_base64: general_purpose::STANDARD.encode(record.image()),
        }
    }
}

fn missing_user_id() -> Error {
    Error::invalid_request("missing user_id")
        .with_details(json!({ "field": "user_id", "code": "missing_user_id" }))
}

/// Save a capture the client has already identified.
#[utoipa::path(
    post,
    path = "/saveResult",
    request_body(content = SaveResultUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Capture saved", body = SaveResultResponse),
        (status = 400, description = "Missing image or user_id", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["captures"],
    operation_id = "saveResult"
)]
#[post("/saveResult")]
pub async fn save_result(
    state: web::Data<HttpState>,
    payload: Multipart,
) -> ApiResult<web::Json<SaveResultResponse>> {
    let mut form = read_upload(payload, state.max_image_bytes).await?;
    let user_id = form.user_id()?.ok_or_else(missing_user_id)?;
    let request = SaveCaptureRequest {
        user_id,
        image: form.take_image(),
        object_name: form.text("object_name").unwrap_or_default().to_owned(),
        confidence: form.text("confidence").unwrap_or_default().to_owned(),
        description: form.text("description").unwrap_or_default().to_owned(),
        buy_link: form.text("buy_link").map(str::to_owned),
    };

    state.captures.save_result(request).await?;
    info!(%user_id, "capture saved");
    Ok(web::Json(SaveResultResponse { success: true }))
}

/// List a user's saved captures, newest first.
#[utoipa::path(
    post,
    path = "/getUserHistory",
    request_body(content = HistoryForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Saved captures", body = [HistoryItem]),
        (status = 400, description = "Missing or invalid user_id", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["captures"],
    operation_id = "getUserHistory"
)]
#[post("/getUserHistory")]
pub async fn get_user_history(
    state: web::Data<HttpState>,
    form: web::Form<HistoryForm>,
) -> ApiResult<web::Json<Vec<HistoryItem>>> {
    let raw = form
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(missing_user_id)?;
    let user_id = parse_user_id(raw)?;

    let records = state.history.history(user_id).await?;
    info!(%user_id, count = records.len(), "history served");
    Ok(web::Json(records.iter().map(HistoryItem::from).collect()))
}

#[cfg(test)]
#[path = "captures_tests.rs"]
mod tests;
