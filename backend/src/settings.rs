//! Application settings loaded via OrthoConfig.
//!
//! Every value can come from CLI flags, `LENS_*` environment variables or a
//! config file. Unset values fall back to the defaults below; an unset API
//! key leaves that provider unconfigured.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::inbound::http::state::DEFAULT_MAX_IMAGE_BYTES;
use crate::outbound::providers::{
    DEFAULT_OPENAI_MODEL, DEFAULT_PROVIDER_TIMEOUT, ProviderEndpoint,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_VISION_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";
const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_PLANTNET_ENDPOINT: &str = "https://my-api.plantnet.org/v2/identify/all";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Invalid setting values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid {setting} {value:?}: {source}")]
    Endpoint {
        setting: &'static str,
        value: String,
        source: url::ParseError,
    },
}

/// Runtime configuration for the backend binary.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LENS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; in-memory storage when unset.
    pub database_url: Option<String>,
    pub vision_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub plantnet_api_key: Option<String>,
    pub vision_endpoint: Option<String>,
    pub openai_endpoint: Option<String>,
    pub openai_model: Option<String>,
    pub plantnet_endpoint: Option<String>,
    /// Per-request provider timeout in seconds.
    pub provider_timeout_secs: Option<u64>,
    /// Largest accepted image upload.
    pub max_image_bytes: Option<usize>,
    pub db_max_connections: Option<u32>,
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("vision_api_key", &redact(&self.vision_api_key))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("plantnet_api_key", &redact(&self.plantnet_api_key))
            .field("vision_endpoint", &self.vision_endpoint)
            .field("openai_endpoint", &self.openai_endpoint)
            .field("openai_model", &self.openai_model)
            .field("plantnet_endpoint", &self.plantnet_endpoint)
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("max_image_bytes", &self.max_image_bytes)
            .field("db_max_connections", &self.db_max_connections)
            .finish()
    }
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|value| value.trim()).filter(|value| !value.is_empty())
}

impl AppSettings {
    /// Listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = present(self.bind_addr.as_ref()).unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Database URL, `None` when persistence should stay in memory.
    pub fn database_url(&self) -> Option<&str> {
        present(self.database_url.as_ref())
    }

    pub fn provider_timeout(&self) -> Duration {
        self.provider_timeout_secs
            .map_or(DEFAULT_PROVIDER_TIMEOUT, Duration::from_secs)
    }

    pub fn max_image_bytes(&self) -> usize {
        self.max_image_bytes.unwrap_or(DEFAULT_MAX_IMAGE_BYTES)
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn openai_model(&self) -> &str {
        present(self.openai_model.as_ref()).unwrap_or(DEFAULT_OPENAI_MODEL)
    }

    fn endpoint(
        &self,
        setting: &'static str,
        endpoint: Option<&String>,
        default: &str,
        api_key: Option<&String>,
    ) -> Result<Option<ProviderEndpoint>, SettingsError> {
        let Some(api_key) = present(api_key) else {
            return Ok(None);
        };
        let value = present(endpoint).unwrap_or(default);
        let url = Url::parse(value).map_err(|source| SettingsError::Endpoint {
            setting,
            value: value.to_owned(),
            source,
        })?;
        Ok(Some(ProviderEndpoint::new(
            url,
            api_key,
            self.provider_timeout(),
        )))
    }

    /// Label provider endpoint, `None` without an API key.
    pub fn vision(&self) -> Result<Option<ProviderEndpoint>, SettingsError> {
        self.endpoint(
            "vision_endpoint",
            self.vision_endpoint.as_ref(),
            DEFAULT_VISION_ENDPOINT,
            self.vision_api_key.as_ref(),
        )
    }

    /// Multimodal provider endpoint, `None` without an API key.
    pub fn openai(&self) -> Result<Option<ProviderEndpoint>, SettingsError> {
        self.endpoint(
            "openai_endpoint",
            self.openai_endpoint.as_ref(),
            DEFAULT_OPENAI_ENDPOINT,
            self.openai_api_key.as_ref(),
        )
    }

    /// Botanical provider endpoint, `None` without an API key.
    pub fn plantnet(&self) -> Result<Option<ProviderEndpoint>, SettingsError> {
        self.endpoint(
            "plantnet_endpoint",
            self.plantnet_endpoint.as_ref(),
            DEFAULT_PLANTNET_ENDPOINT,
            self.plantnet_api_key.as_ref(),
        )
    }
}
