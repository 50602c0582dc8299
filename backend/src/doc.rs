//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the schema wrappers in [`crate::inbound::http::schemas`], so domain
//! types stay free of utoipa derives.
//!
//! The document backs Swagger UI in debug builds and is exported with
//! `cargo run --bin openapi-dump` for client tooling.

use utoipa::OpenApi;

use crate::inbound::http::accounts::{CredentialsForm, LoginResponse, RegisterResponse};
use crate::inbound::http::captures::{HistoryForm, HistoryItem, SaveResultResponse};
use crate::inbound::http::identify::IdentifyResponse;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, IdentifyUpload, PlantIdentifyUpload, SaveResultUpload,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lens identification API",
        description = "Identify photographed objects and plants, manage accounts and saved captures."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::identify::identify,
        crate::inbound::http::identify::identify_openai,
        crate::inbound::http::identify::identify_plantnet,
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::captures::save_result,
        crate::inbound::http::captures::get_user_history,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        IdentifyUpload,
        PlantIdentifyUpload,
        SaveResultUpload,
        IdentifyResponse,
        CredentialsForm,
        RegisterResponse,
        LoginResponse,
        HistoryForm,
        HistoryItem,
        SaveResultResponse,
    )),
    tags(
        (name = "identification", description = "Image identification via external providers"),
        (name = "accounts", description = "Registration and login"),
        (name = "captures", description = "Saved identification history"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
