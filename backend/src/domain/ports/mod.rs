//! Driving and driven ports for the identification backend.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod authenticator;
mod capture_command;
mod capture_query;
mod capture_store;
mod identification_pipeline;
mod password_hasher;
mod provider_client;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError, StoredAccount};
#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use authenticator::Authenticator;
#[cfg(test)]
pub use capture_command::MockCaptureCommand;
pub use capture_command::{CaptureCommand, SaveCaptureRequest};
#[cfg(test)]
pub use capture_query::MockCaptureQuery;
pub use capture_query::CaptureQuery;
#[cfg(test)]
pub use capture_store::MockCaptureStore;
pub use capture_store::{CaptureStore, CaptureStoreError};
#[cfg(test)]
pub use identification_pipeline::MockIdentificationPipeline;
pub use identification_pipeline::IdentificationPipeline;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use provider_client::MockProviderClient;
pub use provider_client::{ProviderClient, ProviderClientError};
