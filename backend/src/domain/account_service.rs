//! Account registration and login.
//!
//! Password hashing is CPU bound, so both operations hand the hasher to
//! Tokio's blocking pool.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, Authenticator, PasswordHasher, PasswordHasherError,
};
use crate::domain::{Credentials, Error, UserAccount, UserId};

fn map_repository_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Duplicate { .. } => Error::conflict("Email already exists"),
        AccountRepositoryError::Connection { message } => {
            error!(%message, "account repository unavailable");
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        AccountRepositoryError::Query { message } => {
            error!(%message, "account repository query failed");
            Error::internal(format!("account repository error: {message}"))
        }
    }
}

async fn run_hasher<T, F>(job: F) -> Result<T, Error>
where
    F: FnOnce() -> Result<T, PasswordHasherError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
        .map_err(|err| Error::internal(err.to_string()))
}

/// Service implementing [`Authenticator`].
pub struct AccountService<R: ?Sized, H: ?Sized> {
    accounts: Arc<R>,
    hasher: Arc<H>,
}

impl<R: ?Sized, H: ?Sized> AccountService<R, H> {
    /// Create a service over an account repository and password hasher.
    pub fn new(accounts: Arc<R>, hasher: Arc<H>) -> Self {
        Self { accounts, hasher }
    }
}

#[async_trait]
impl<R, H> Authenticator for AccountService<R, H>
where
    R: AccountRepository + ?Sized,
    H: PasswordHasher + ?Sized + 'static,
{
    async fn register(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(credentials.password().to_owned());
        let password_hash = run_hasher(move || hasher.hash(&password)).await?;

        let id = self
            .accounts
            .insert(credentials.email(), &password_hash)
            .await
            .map_err(map_repository_error)?;
        debug!(user_id = %id, "registered account");
        Ok(id)
    }

    async fn login(&self, credentials: &Credentials) -> Result<Option<UserAccount>, Error> {
        let Some(stored) = self
            .accounts
            .find_by_email(credentials.email())
            .await
            .map_err(map_repository_error)?
        else {
            debug!("login for unknown email");
            return Ok(None);
        };

        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(credentials.password().to_owned());
        let password_hash = stored.password_hash;
        let matches = run_hasher(move || hasher.verify(&password, &password_hash)).await?;

        if matches {
            Ok(Some(stored.account))
        } else {
            debug!(user_id = %stored.account.id(), "login with wrong password");
            Ok(None)
        }
    }
}
