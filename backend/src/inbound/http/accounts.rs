//! Account handlers.
//!
//! ```text
//! POST /register   email=ada@example.com&password=hunter2
//! POST /login      email=ada@example.com&password=hunter2
//! ```
//!
//! Both endpoints take URL-encoded forms, as sent by the mobile client.

use actix_web::{HttpResponse, http::StatusCode, post, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{Credentials, CredentialsValidationError, Error, ErrorCode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Form body shared by register and login.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Result of a registration attempt.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Machine-readable failure category, present only on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "conflict")]
    pub code: Option<ErrorCode>,
}

/// Login outcome; both fields are null when credentials do not match.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct LoginResponse {
    pub id: Option<i32>,
    pub tier: Option<String>,
}

fn validation_message(err: &CredentialsValidationError) -> &'static str {
    match err {
        CredentialsValidationError::EmptyEmail => "email must not be empty",
        CredentialsValidationError::MalformedEmail => "email must be a valid address",
        CredentialsValidationError::EmptyPassword => "password must not be empty",
    }
}

fn register_failure(status: StatusCode, error: &Error) -> HttpResponse {
    HttpResponse::build(status).json(RegisterResponse {
        success: false,
        message: Some(error.message().to_owned()),
        code: Some(error.code()),
    })
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/register",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid email or password", body = RegisterResponse),
        (status = 409, description = "Email already registered", body = RegisterResponse),
        (status = 503, description = "Account storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let CredentialsForm { email, password } = form.into_inner();
    let credentials = match Credentials::try_new(&email, password) {
        Ok(credentials) => credentials,
        Err(err) => {
            let error = Error::invalid_request(validation_message(&err));
            return Ok(register_failure(StatusCode::BAD_REQUEST, &error));
        }
    };

    match state.authenticator.register(&credentials).await {
        Ok(user_id) => {
            info!(%user_id, "account registered");
            Ok(HttpResponse::Ok().json(RegisterResponse {
                success: true,
                message: None,
                code: None,
            }))
        }
        Err(error) if error.code() == ErrorCode::Conflict => {
            debug!("registration rejected for existing email");
            Ok(register_failure(StatusCode::CONFLICT, &error))
        }
        Err(error) => Err(error),
    }
}

/// Resolve credentials to an account id and tier.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Account id and tier, or nulls on mismatch", body = LoginResponse),
        (status = 503, description = "Account storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    form: web::Form<CredentialsForm>,
) -> ApiResult<web::Json<LoginResponse>> {
    let CredentialsForm { email, password } = form.into_inner();
    let Ok(credentials) = Credentials::try_new(&email, password) else {
        return Ok(web::Json(LoginResponse { id: None, tier: None }));
    };

    let account = state.authenticator.login(&credentials).await?;
    Ok(web::Json(match account {
        Some(account) => LoginResponse {
            id: Some(account.id().get()),
            tier: Some(account.tier().to_owned()),
        },
        None => LoginResponse { id: None, tier: None },
    }))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
