//! OpenAPI schema definitions for domain types and multipart uploads.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their serialised shape so utoipa can document them
//! from the inbound adapter layer.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The request collides with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A recognition provider rejected the request.
    #[schema(rename = "upstream_error")]
    UpstreamError,
    /// Storage or provider configuration is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "no image provided")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// Multipart body for `/identify` and `/identify_openai`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct IdentifyUpload {
    /// Photographed object.
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
    /// Save the result to this user's history when present.
    #[schema(example = "12")]
    user_id: Option<String>,
}

/// Multipart body for `/identify_plantnet`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PlantIdentifyUpload {
    /// Photographed plant.
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
    /// Plant organs shown in the photo; defaults to `auto`.
    #[schema(example = "flower")]
    organs: Option<String>,
    #[schema(example = "12")]
    user_id: Option<String>,
}

/// Multipart body for `/saveResult`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SaveResultUpload {
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
    #[schema(example = "Rose")]
    object_name: String,
    /// Display percentage as returned by the identify endpoints.
    #[schema(example = "87.00%")]
    confidence: String,
    description: String,
    buy_link: Option<String>,
    #[schema(example = "12")]
    user_id: String,
}
