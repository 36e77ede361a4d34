//! Account registration and login services.
//!
//! Implements the [`SignupService`] and [`LoginService`] driving ports on top
//! of an [`AccountRepository`] and a [`PasswordHasher`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    AccountPersistenceError, AccountRepository, LoginService, PasswordHashError, PasswordHasher,
    SignupService,
};
use crate::domain::{
    Error, LoginCredentials, SignupDetails, UserAccount, UserAccountParts, UserId,
};

/// Message returned when either identity field is already registered.
pub const DUPLICATE_ACCOUNT_MESSAGE: &str = "email or username already exists";
/// Message returned when no account has the supplied username.
pub const UNKNOWN_USERNAME_MESSAGE: &str = "Username not found";
/// Message returned when the password does not match.
pub const INCORRECT_PASSWORD_MESSAGE: &str = "Incorrect password";

/// Account service implementing the sign-up and login driving ports.
#[derive(Clone)]
pub struct AccountService<R, H> {
    accounts: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AccountService<R, H> {
    /// Create a new service from its driven ports.
    pub fn new(accounts: Arc<R>, hasher: Arc<H>) -> Self {
        Self { accounts, hasher }
    }
}

impl<R, H> AccountService<R, H>
where
    R: AccountRepository,
    H: PasswordHasher,
{
    fn map_persistence_error(err: AccountPersistenceError) -> Error {
        match err {
            AccountPersistenceError::Connection { message } => {
                error!(error = %message, "account store unreachable");
                Error::service_unavailable("account store unavailable")
            }
            AccountPersistenceError::Query { message } => {
                error!(error = %message, "account store query failed");
                Error::internal(format!("account store error: {message}"))
            }
            AccountPersistenceError::Duplicate { .. } => Error::conflict(DUPLICATE_ACCOUNT_MESSAGE),
        }
    }

    fn map_hash_error(err: PasswordHashError) -> Error {
        error!(error = %err, "password hashing failed");
        Error::internal(err.to_string())
    }

    async fn identity_taken(&self, details: &SignupDetails) -> Result<bool, Error> {
        let by_email = self
            .accounts
            .find_by_email(details.email())
            .await
            .map_err(Self::map_persistence_error)?;
        if by_email.is_some() {
            return Ok(true);
        }
        let by_username = self
            .accounts
            .find_by_username(details.username())
            .await
            .map_err(Self::map_persistence_error)?;
        Ok(by_username.is_some())
    }
}

#[async_trait]
impl<R, H> SignupService for AccountService<R, H>
where
    R: AccountRepository,
    H: PasswordHasher,
{
    async fn register(&self, details: &SignupDetails) -> Result<UserId, Error> {
        if self.identity_taken(details).await? {
            return Err(Error::conflict(DUPLICATE_ACCOUNT_MESSAGE));
        }

        let password_hash = self
            .hasher
            .hash(details.password())
            .await
            .map_err(Self::map_hash_error)?;

        let account = UserAccount::new(UserAccountParts {
            id: UserId::random(),
            firstname: details.firstname().clone(),
            lastname: details.lastname().clone(),
            email: details.email().clone(),
            username: details.username().clone(),
            password_hash,
        });

        self.accounts
            .insert(&account)
            .await
            .map_err(Self::map_persistence_error)?;

        info!(account_id = %account.id(), "account registered");
        Ok(*account.id())
    }
}

#[async_trait]
impl<R, H> LoginService for AccountService<R, H>
where
    R: AccountRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let account = self
            .accounts
            .find_by_username(credentials.username())
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Error::not_found(UNKNOWN_USERNAME_MESSAGE))?;

        let matches = self
            .hasher
            .verify(credentials.password(), account.password_hash())
            .await
            .map_err(Self::map_hash_error)?;

        if matches {
            Ok(*account.id())
        } else {
            Err(Error::unauthorized(INCORRECT_PASSWORD_MESSAGE))
        }
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
