//! Port abstraction for account persistence adapters and their errors.
//!
//! Uniqueness of `email` and `username` is owned by the store: adapters must
//! report a colliding insert as [`AccountPersistenceError::Duplicate`] so the
//! check-then-insert race in the sign-up flow still surfaces as a conflict.

use async_trait::async_trait;

use crate::domain::{EmailAddress, UserAccount, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// Insert collided with an existing email or username.
        Duplicate { message: String } => "account already exists: {message}",
    }
}

/// Storage contract for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fetch the account registered with `email`, if any.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, AccountPersistenceError>;

    /// Fetch the account registered with `username`, if any.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, AccountPersistenceError>;

    /// Persist a new account.
    ///
    /// Fails with [`AccountPersistenceError::Duplicate`] when the email or
    /// username is already taken.
    async fn insert(&self, account: &UserAccount) -> Result<(), AccountPersistenceError>;
}
