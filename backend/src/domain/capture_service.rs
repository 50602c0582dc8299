//! Capture history services.
//!
//! `saveResult` submissions carry a display confidence (`"87.00%"`); it is
//! parsed back to a number here so the store only ever sees numeric values.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::identification_service::map_capture_store_error;
use crate::domain::ports::{CaptureCommand, CaptureQuery, CaptureStore, SaveCaptureRequest};
use crate::domain::{CaptureRecord, Confidence, Error, IdentificationResult, UserId};

/// Service implementing [`CaptureCommand`] and [`CaptureQuery`].
pub struct CaptureService<S: ?Sized> {
    capture_store: Arc<S>,
}

impl<S: ?Sized> CaptureService<S> {
    /// Create a service over the capture store.
    pub fn new(capture_store: Arc<S>) -> Self {
        Self { capture_store }
    }
}

#[async_trait]
impl<S> CaptureCommand for CaptureService<S>
where
    S: CaptureStore + ?Sized,
{
    async fn save_result(&self, request: SaveCaptureRequest) -> Result<(), Error> {
        let SaveCaptureRequest {
            user_id,
            image,
            object_name,
            confidence,
            description,
            buy_link,
        } = request;
        if image.is_empty() {
            return Err(Error::invalid_request("no image provided"));
        }

        let result = IdentificationResult::new(
            object_name,
            Confidence::parse(&confidence),
            description,
            buy_link,
        );
        let record = CaptureRecord::new(user_id, image, result);
        self.capture_store
            .save(&record)
            .await
            .map_err(map_capture_store_error)
    }
}

#[async_trait]
impl<S> CaptureQuery for CaptureService<S>
where
    S: CaptureStore + ?Sized,
{
    async fn history(&self, user_id: UserId) -> Result<Vec<CaptureRecord>, Error> {
        self.capture_store
            .history(user_id)
            .await
            .map_err(map_capture_store_error)
    }
}
