//! Backend entry-point: loads settings, prepares storage and providers, and
//! serves the REST endpoints.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use lens_backend::inbound::http::health::HealthState;
use lens_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use lens_backend::outbound::providers::{OpenAiVisionClient, PlantNetClient, VisionLabelClient};
use lens_backend::settings::AppSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = build_server_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}

async fn build_server_config(settings: &AppSettings) -> std::io::Result<ServerConfig> {
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let mut config =
        ServerConfig::new(bind_addr).with_max_image_bytes(settings.max_image_bytes());

    if let Some(database_url) = settings.database_url() {
        run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
        )
        .await
        .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    if let Some(endpoint) = settings.vision().map_err(std::io::Error::other)? {
        let client = VisionLabelClient::new(endpoint).map_err(std::io::Error::other)?;
        config = config.with_provider(Arc::new(client));
    }
    if let Some(endpoint) = settings.openai().map_err(std::io::Error::other)? {
        let client = OpenAiVisionClient::new(endpoint, settings.openai_model())
            .map_err(std::io::Error::other)?;
        config = config.with_provider(Arc::new(client));
    }
    if let Some(endpoint) = settings.plantnet().map_err(std::io::Error::other)? {
        let client = PlantNetClient::new(endpoint).map_err(std::io::Error::other)?;
        config = config.with_provider(Arc::new(client));
    }

    info!(
        %bind_addr,
        persistent = settings.database_url().is_some(),
        providers = config.providers.len(),
        "server configured"
    );
    Ok(config)
}
