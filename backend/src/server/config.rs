//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use lens_backend::domain::ports::ProviderClient;
use lens_backend::inbound::http::state::DEFAULT_MAX_IMAGE_BYTES;
use lens_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) providers: Vec<Arc<dyn ProviderClient>>,
    pub(crate) max_image_bytes: usize,
}

impl ServerConfig {
    /// In-memory storage and no providers until configured.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            providers: Vec::new(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    /// Attach a database connection pool for the persistence adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Register a recognition provider client.
    #[must_use]
    pub fn with_provider(mut self, client: Arc<dyn ProviderClient>) -> Self {
        self.providers.push(client);
        self
    }

    /// Cap the size of uploaded images.
    #[must_use]
    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }
}
