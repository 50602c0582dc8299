//! Shared helpers for the HTTP integration tests.
#![allow(dead_code, reason = "each test binary uses a subset of the helpers")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;
use serde_json::Value;

use lens_backend::Trace;
use lens_backend::domain::ports::{ProviderClient, ProviderClientError};
use lens_backend::domain::{
    AccountService, CaptureService, IdentificationService, ImagePayload, ProviderKind,
    ProviderOptions, ProviderRawReply,
};
use lens_backend::inbound::http::accounts::{login, register};
use lens_backend::inbound::http::captures::{get_user_history, save_result};
use lens_backend::inbound::http::identify::{identify, identify_openai, identify_plantnet};
use lens_backend::inbound::http::state::{HttpState, HttpStatePorts};
use lens_backend::outbound::memory::{InMemoryAccountRepository, InMemoryCaptureStore};
use lens_backend::outbound::security::BcryptPasswordHasher;

/// Provider double returning a canned reply and counting calls.
pub struct StubProvider {
    kind: ProviderKind,
    reply: Result<Value, ProviderClientError>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn replying(kind: ProviderKind, reply: Value) -> Arc<Self> {
        Arc::new(Self {
            kind,
            reply: Ok(reply),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(kind: ProviderKind, error: ProviderClientError) -> Arc<Self> {
        Arc::new(Self {
            kind,
            reply: Err(error),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderClient for StubProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn identify(
        &self,
        _image: &ImagePayload,
        _options: &ProviderOptions,
    ) -> Result<ProviderRawReply, ProviderClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

/// Build the full route set over in-memory storage and the given providers.
pub fn test_app(
    providers: &[Arc<StubProvider>],
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let store = Arc::new(InMemoryCaptureStore::new());
    let identification = providers.iter().fold(
        IdentificationService::new(Arc::clone(&store)),
        |service, provider| service.with_provider(Arc::clone(provider) as Arc<dyn ProviderClient>),
    );
    let captures = Arc::new(CaptureService::new(store));
    let state = HttpState::new(HttpStatePorts {
        identification: Arc::new(identification),
        authenticator: Arc::new(AccountService::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(BcryptPasswordHasher::with_cost(4)),
        )),
        captures: captures.clone(),
        history: captures,
    });

    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(identify)
        .service(identify_openai)
        .service(identify_plantnet)
        .service(register)
        .service(login)
        .service(save_result)
        .service(get_user_history)
}
