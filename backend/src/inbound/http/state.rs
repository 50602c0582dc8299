//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so tests can swap in doubles without any I/O.

use std::sync::Arc;

use crate::domain::ports::{Authenticator, CaptureCommand, CaptureQuery, IdentificationPipeline};

/// Default ceiling for a single uploaded image.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Driving ports used by the handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub identification: Arc<dyn IdentificationPipeline>,
    pub authenticator: Arc<dyn Authenticator>,
    pub captures: Arc<dyn CaptureCommand>,
    pub history: Arc<dyn CaptureQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub identification: Arc<dyn IdentificationPipeline>,
    pub authenticator: Arc<dyn Authenticator>,
    pub captures: Arc<dyn CaptureCommand>,
    pub history: Arc<dyn CaptureQuery>,
    pub max_image_bytes: usize,
}

impl HttpState {
    /// Bundle `ports` with the default upload limit.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            identification,
            authenticator,
            captures,
            history,
        } = ports;
        Self {
            identification,
            authenticator,
            captures,
            history,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    /// Override the per-image upload limit.
    #[must_use]
    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }
}
