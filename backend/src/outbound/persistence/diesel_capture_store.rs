//! PostgreSQL-backed `CaptureStore`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CaptureStore, CaptureStoreError};
use crate::domain::{CaptureRecord, Confidence, IdentificationResult, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CaptureRow, NewCaptureRow};
use super::pool::{DbPool, PoolError};
use super::schema::capture_results;

/// Diesel implementation of the capture store port.
#[derive(Clone)]
pub struct DieselCaptureStore {
    pool: DbPool,
}

impl DieselCaptureStore {
    /// Create a store over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CaptureStoreError {
    map_basic_pool_error(error, CaptureStoreError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CaptureStoreError {
    map_basic_diesel_error(
        error,
        CaptureStoreError::query,
        CaptureStoreError::connection,
    )
}

fn row_to_record(row: CaptureRow) -> CaptureRecord {
    let CaptureRow {
        id: _,
        user_id,
        image_data,
        object_name,
        confidence,
        description,
        buy_link,
    } = row;
    CaptureRecord::new(
        UserId::new(user_id),
        image_data,
        IdentificationResult::new(
            object_name,
            Confidence::new(confidence),
            description,
            buy_link,
        ),
    )
}

#[async_trait]
impl CaptureStore for DieselCaptureStore {
    async fn save(&self, record: &CaptureRecord) -> Result<(), CaptureStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let result = record.result();
        let row = NewCaptureRow {
            user_id: record.user_id().get(),
            image_data: record.image(),
            object_name: result.name(),
            confidence: result.confidence().value(),
            description: result.description(),
            buy_link: result.link(),
        };

        diesel::insert_into(capture_results::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn history(&self, user_id: UserId) -> Result<Vec<CaptureRecord>, CaptureStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CaptureRow> = capture_results::table
            .filter(capture_results::user_id.eq(user_id.get()))
            .order(capture_results::id.desc())
            .select(CaptureRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_record).collect())
    }
}
