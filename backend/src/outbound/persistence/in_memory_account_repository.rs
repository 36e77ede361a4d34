//! Process-local `AccountRepository` used when no database is configured.
//!
//! Accounts live only as long as the process. Uniqueness of email and username
//! is enforced under the same lock as the insert, matching the unique indexes
//! of the PostgreSQL schema.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{AccountPersistenceError, AccountRepository};
use crate::domain::{EmailAddress, UserAccount, Username};

/// In-memory account store.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<UserAccount>>,
}

impl InMemoryAccountRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.lock().map(|accounts| accounts.len()).unwrap_or_default()
    }

    /// Whether the store holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<UserAccount>>, AccountPersistenceError> {
        self.accounts
            .lock()
            .map_err(|_| AccountPersistenceError::query("account store lock poisoned"))
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, AccountPersistenceError> {
        let accounts = self.lock()?;
        Ok(accounts
            .iter()
            .find(|account| account.email() == email)
            .cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, AccountPersistenceError> {
        let accounts = self.lock()?;
        Ok(accounts
            .iter()
            .find(|account| account.username() == username)
            .cloned())
    }

    async fn insert(&self, account: &UserAccount) -> Result<(), AccountPersistenceError> {
        let mut accounts = self.lock()?;
        if let Some(existing) = accounts.iter().find(|stored| {
            stored.email() == account.email() || stored.username() == account.username()
        }) {
            let column = if existing.email() == account.email() {
                "email"
            } else {
                "username"
            };
            return Err(AccountPersistenceError::duplicate(column));
        }
        accounts.push(account.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{FirstName, LastName, PasswordHash, UserAccountParts, UserId};
    use rstest::{fixture, rstest};

    fn account(username: &str, email: &str) -> UserAccount {
        UserAccount::new(UserAccountParts {
            id: UserId::random(),
            firstname: FirstName::new("A").expect("firstname"),
            lastname: LastName::new("B").expect("lastname"),
            email: EmailAddress::new(email).expect("email"),
            username: Username::new(username).expect("username"),
            password_hash: PasswordHash::new("$2b$10$hash").expect("hash"),
        })
    }

    #[fixture]
    fn seeded() -> InMemoryAccountRepository {
        let repo = InMemoryAccountRepository::new();
        repo.accounts
            .lock()
            .expect("fresh lock")
            .push(account("au", "a@x.com"));
        repo
    }

    #[rstest]
    #[tokio::test]
    async fn finds_accounts_by_either_key(seeded: InMemoryAccountRepository) {
        let email = EmailAddress::new("a@x.com").expect("email");
        let username = Username::new("au").expect("username");

        let by_email = seeded.find_by_email(&email).await.expect("lookup");
        let by_username = seeded.find_by_username(&username).await.expect("lookup");

        assert_eq!(by_email, by_username);
        assert!(by_email.is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_keys_return_none(seeded: InMemoryAccountRepository) {
        let username = Username::new("nope").expect("username");
        let found = seeded.find_by_username(&username).await.expect("lookup");
        assert!(found.is_none());
    }

    #[rstest]
    #[case("au", "other@x.com", "username")]
    #[case("other", "a@x.com", "email")]
    #[tokio::test]
    async fn insert_rejects_duplicates(
        seeded: InMemoryAccountRepository,
        #[case] username: &str,
        #[case] email: &str,
        #[case] column: &str,
    ) {
        let err = seeded
            .insert(&account(username, email))
            .await
            .expect_err("duplicate rejected");

        assert_eq!(err, AccountPersistenceError::duplicate(column));
        assert_eq!(seeded.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_stores_new_accounts(seeded: InMemoryAccountRepository) {
        seeded
            .insert(&account("grace", "g@x.com"))
            .await
            .expect("insert succeeds");
        assert_eq!(seeded.len(), 2);
    }
}
