//! `CaptureStore` kept in a vector behind a lock.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{CaptureStore, CaptureStoreError};
use crate::domain::{CaptureRecord, UserId};

/// Append-only capture store living in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCaptureStore {
    records: RwLock<Vec<CaptureRecord>>,
}

impl InMemoryCaptureStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CaptureStore for InMemoryCaptureStore {
    async fn save(&self, record: &CaptureRecord) -> Result<(), CaptureStoreError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn history(&self, user_id: UserId) -> Result<Vec<CaptureRecord>, CaptureStoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .rev()
            .filter(|record| record.user_id() == user_id)
            .cloned()
            .collect())
    }
}
