//! In-process adapters used when no database is configured, and in tests.

mod account_repository;
mod capture_store;

pub use account_repository::InMemoryAccountRepository;
pub use capture_store::InMemoryCaptureStore;
