//! Transport helpers shared by the provider clients.

use base64::{Engine as _, engine::general_purpose};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::domain::ProviderKind;
use crate::domain::ports::ProviderClientError;

use super::ProviderEndpoint;

pub(super) fn build_client(config: &ProviderEndpoint) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(config.timeout()).build()
}

pub(super) fn encode_image(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Send `request` once and decode a JSON reply.
pub(super) async fn send_for_json(
    kind: ProviderKind,
    request: RequestBuilder,
) -> Result<Value, ProviderClientError> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    decode_reply(kind, status, body.as_ref())
}

fn decode_reply(
    kind: ProviderKind,
    status: StatusCode,
    body: &[u8],
) -> Result<Value, ProviderClientError> {
    if !status.is_success() {
        debug!(
            provider = %kind,
            status = status.as_u16(),
            body = %body_preview(body),
            "provider returned non-success status"
        );
        return Err(ProviderClientError::status(
            status.as_u16(),
            String::from_utf8_lossy(body),
        ));
    }

    serde_json::from_slice(body).map_err(|error| {
        ProviderClientError::decode(error.to_string(), String::from_utf8_lossy(body))
    })
}

fn map_transport_error(error: reqwest::Error) -> ProviderClientError {
    if error.is_timeout() {
        ProviderClientError::timeout(error.to_string())
    } else {
        ProviderClientError::transport(error.to_string())
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
