//! Driving port for reading a user's capture history.

use async_trait::async_trait;

use crate::domain::{CaptureRecord, Error, UserId};

/// Read captures previously saved for a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptureQuery: Send + Sync {
    /// Captures for `user_id`, newest first.
    async fn history(&self, user_id: UserId) -> Result<Vec<CaptureRecord>, Error>;
}
