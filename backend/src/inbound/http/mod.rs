//! HTTP inbound adapter exposing the REST endpoints.

pub mod accounts;
pub mod captures;
pub mod error;
pub mod health;
pub mod identify;
pub mod multipart;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
