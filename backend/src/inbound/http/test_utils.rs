//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    MockAuthenticator, MockCaptureCommand, MockCaptureQuery, MockIdentificationPipeline,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Mock ports for handler tests.
///
/// Mocks without expectations panic when called, so a test only configures
/// the ports its handler should touch.
#[derive(Default)]
pub struct MockPorts {
    pub identification: MockIdentificationPipeline,
    pub authenticator: MockAuthenticator,
    pub captures: MockCaptureCommand,
    pub history: MockCaptureQuery,
}

impl MockPorts {
    /// Wrap the mocks in handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            identification: Arc::new(self.identification),
            authenticator: Arc::new(self.authenticator),
            captures: Arc::new(self.captures),
            history: Arc::new(self.history),
        })
    }
}
