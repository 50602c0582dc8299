//! Driving port for the identification use case.

use async_trait::async_trait;

use crate::domain::{Error, IdentificationResult, ProviderKind, ProviderOptions, UserId};

/// Identify an uploaded image with one provider, optionally saving it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentificationPipeline: Send + Sync {
    /// Identify `image` with the `kind` provider.
    ///
    /// Fails with `invalid_request` for an empty image before any provider
    /// call is made.
    async fn run(
        &self,
        image: Vec<u8>,
        kind: ProviderKind,
        options: ProviderOptions,
    ) -> Result<IdentificationResult, Error>;

    /// Identify and then append the result to `user_id`'s history.
    async fn run_and_save(
        &self,
        image: Vec<u8>,
        kind: ProviderKind,
        options: ProviderOptions,
        user_id: UserId,
    ) -> Result<IdentificationResult, Error>;
}
