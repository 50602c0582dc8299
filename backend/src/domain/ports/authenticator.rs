//! Driving port for account registration and login.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, UserAccount, UserId};

/// Registers and authenticates users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Create an account. A taken email fails with `conflict`.
    async fn register(&self, credentials: &Credentials) -> Result<UserId, Error>;

    /// Resolve credentials to an account; `None` when they do not match.
    async fn login(&self, credentials: &Credentials) -> Result<Option<UserAccount>, Error>;
}
