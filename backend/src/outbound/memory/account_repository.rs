//! `AccountRepository` kept in process memory.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{AccountRepository, AccountRepositoryError, StoredAccount};
use crate::domain::{DEFAULT_TIER, UserAccount, UserId};

#[derive(Debug, Default)]
struct Accounts {
    next_id: i32,
    by_email: HashMap<String, StoredAccount>,
}

/// Account repository for development servers and tests.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<Accounts>,
}

impl InMemoryAccountRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<UserId, AccountRepositoryError> {
        let mut accounts = self.accounts.lock().await;
        if accounts.by_email.contains_key(email) {
            return Err(AccountRepositoryError::duplicate(email));
        }
        accounts.next_id += 1;
        let id = UserId::new(accounts.next_id);
        accounts.by_email.insert(
            email.to_owned(),
            StoredAccount {
                account: UserAccount::new(id, DEFAULT_TIER),
                password_hash: password_hash.to_owned(),
            },
        );
        Ok(id)
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError> {
        Ok(self.accounts.lock().await.by_email.get(email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_sequential_and_emails_unique() {
        let repo = InMemoryAccountRepository::new();
        let first = repo.insert("a@example.com", "h1").await.expect("insert");
        let second = repo.insert("b@example.com", "h2").await.expect("insert");
        let duplicate = repo.insert("a@example.com", "h3").await;

        assert_eq!((first.get(), second.get()), (1, 2));
        assert_eq!(
            duplicate,
            Err(AccountRepositoryError::duplicate("a@example.com"))
        );
        let stored = repo
            .find_by_email("a@example.com")
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(stored.password_hash, "h1");
        assert_eq!(stored.account.tier(), "free");
    }
}
