//! Builders wiring domain services onto storage and provider adapters.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use lens_backend::domain::ports::{
    AccountRepository, Authenticator, CaptureCommand, CaptureQuery, CaptureStore,
    IdentificationPipeline,
};
use lens_backend::domain::{AccountService, CaptureService, IdentificationService};
use lens_backend::inbound::http::state::{HttpState, HttpStatePorts};
use lens_backend::outbound::memory::{InMemoryAccountRepository, InMemoryCaptureStore};
use lens_backend::outbound::persistence::{DieselAccountRepository, DieselCaptureStore};
use lens_backend::outbound::security::BcryptPasswordHasher;

use super::ServerConfig;

fn build_storage(config: &ServerConfig) -> (Arc<dyn CaptureStore>, Arc<dyn AccountRepository>) {
    match &config.db_pool {
        Some(pool) => (
            Arc::new(DieselCaptureStore::new(pool.clone())),
            Arc::new(DieselAccountRepository::new(pool.clone())),
        ),
        None => {
            info!("no database configured; captures and accounts are kept in memory");
            (
                Arc::new(InMemoryCaptureStore::new()),
                Arc::new(InMemoryAccountRepository::new()),
            )
        }
    }
}

/// Build the handler state from `config`.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (capture_store, accounts) = build_storage(config);

    let identification = config.providers.iter().fold(
        IdentificationService::new(Arc::clone(&capture_store)),
        |service, client| service.with_provider(Arc::clone(client)),
    );
    let identification: Arc<dyn IdentificationPipeline> = Arc::new(identification);

    let authenticator: Arc<dyn Authenticator> = Arc::new(AccountService::new(
        accounts,
        Arc::new(BcryptPasswordHasher::default()),
    ));

    let captures = Arc::new(CaptureService::new(capture_store));
    let captures_command: Arc<dyn CaptureCommand> = captures.clone();
    let captures_query: Arc<dyn CaptureQuery> = captures;

    web::Data::new(
        HttpState::new(HttpStatePorts {
            identification,
            authenticator,
            captures: captures_command,
            history: captures_query,
        })
        .with_max_image_bytes(config.max_image_bytes),
    )
}
