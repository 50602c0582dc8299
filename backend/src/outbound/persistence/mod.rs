//! PostgreSQL persistence adapters built on Diesel.
//!
//! Row structs and table definitions stay private to this module; adapters
//! translate between them and domain types only.

mod diesel_account_repository;
mod diesel_basic_error_mapping;
mod diesel_capture_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_capture_store::DieselCaptureStore;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
