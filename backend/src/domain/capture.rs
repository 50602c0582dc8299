//! Saved identification captures.

use super::{IdentificationResult, UserId};

/// An identification result saved against a user, with the photographed image.
///
/// Records are append-only; nothing in the domain mutates one after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRecord {
    user_id: UserId,
    image: Vec<u8>,
    result: IdentificationResult,
}

impl CaptureRecord {
    /// Bundle a result with its owner and image bytes.
    pub fn new(user_id: UserId, image: Vec<u8>, result: IdentificationResult) -> Self {
        Self {
            user_id,
            image,
            result,
        }
    }

    /// Owning user.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Raw image bytes as uploaded.
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    /// Canonical identification result.
    pub fn result(&self) -> &IdentificationResult {
        &self.result
    }
}
