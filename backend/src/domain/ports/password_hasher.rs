//! Driven port for one-way password hashing.

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hasher adapters.
    pub enum PasswordHasherError {
        /// Hashing or verification failed inside the algorithm.
        Algorithm { message: String } => "password hashing failed: {message}",
    }
}

/// Hashes and verifies passwords. Implementations may be CPU heavy; callers
/// run them off the async executor.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted hash of `password`.
    fn hash(&self, password: &str) -> Result<String, PasswordHasherError>;

    /// Check `password` against a stored `hash`.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHasherError>;
}
