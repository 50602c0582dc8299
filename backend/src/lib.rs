//! Object and plant identification backend.
//!
//! The crate follows a ports-and-adapters layout: [`domain`] holds the
//! identification pipeline, normalisation and account logic behind port
//! traits; [`inbound`] exposes them over HTTP; [`outbound`] talks to the
//! recognition providers, PostgreSQL and bcrypt.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
