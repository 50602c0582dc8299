//! Driving port for saving a capture chosen by the client.

use async_trait::async_trait;

use crate::domain::{Error, UserId};

/// Client-supplied capture, as submitted by the save form.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveCaptureRequest {
    pub user_id: UserId,
    pub image: Vec<u8>,
    pub object_name: String,
    /// Display confidence such as `"87.00%"`; parsed by the service.
    pub confidence: String,
    pub description: String,
    pub buy_link: Option<String>,
}

/// Persist captures on behalf of a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptureCommand: Send + Sync {
    /// Append the capture to the user's history.
    async fn save_result(&self, request: SaveCaptureRequest) -> Result<(), Error>;
}
