//! Driven port for user account persistence.

use async_trait::async_trait;

use crate::domain::{UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// An account with this email already exists.
        Duplicate { email: String } => "account already exists for {email}",
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
    }
}

/// Account row together with its stored password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAccount {
    pub account: UserAccount,
    pub password_hash: String,
}

/// Port for creating and looking up accounts by email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account on the default tier.
    async fn insert(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<UserId, AccountRepositoryError>;

    /// Look up an account by normalised email.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError>;
}
