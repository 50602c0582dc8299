//! bcrypt implementation of the `PasswordHasher` port.

use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Hashes passwords with bcrypt at a configurable cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Hasher at `cost`, clamped into bcrypt's accepted `4..=31`.
    #[must_use]
    pub fn with_cost(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
        }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHasherError> {
        bcrypt::hash(password, self.cost)
            .map_err(|err| PasswordHasherError::algorithm(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHasherError> {
        bcrypt::verify(password, hash)
            .map_err(|err| PasswordHasherError::algorithm(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hasher = BcryptPasswordHasher::with_cost(4);
        let hash = hasher.hash("hunter2").expect("hash");
        assert_ne!(hash, "hunter2");
        assert!(hasher.verify("hunter2", &hash).expect("verify"));
        assert!(!hasher.verify("hunter3", &hash).expect("verify"));
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let hasher = BcryptPasswordHasher::with_cost(4);
        assert!(hasher.verify("hunter2", "not-a-hash").is_err());
    }
}
