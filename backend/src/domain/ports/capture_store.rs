//! Driven port for persisted identification captures.

use async_trait::async_trait;

use crate::domain::{CaptureRecord, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by capture store adapters.
    pub enum CaptureStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "capture store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "capture store query failed: {message}",
    }
}

/// Append-only storage of capture records.
///
/// Implementations must make each `save` atomic and visible to a subsequent
/// `history` call from the same caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptureStore: Send + Sync {
    /// Append a record.
    async fn save(&self, record: &CaptureRecord) -> Result<(), CaptureStoreError>;

    /// All records for `user_id`, newest first.
    async fn history(&self, user_id: UserId) -> Result<Vec<CaptureRecord>, CaptureStoreError>;
}
