//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, SignupDetails, UserId};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Register a new account and return its id.
    ///
    /// Fails with [`crate::domain::ErrorCode::Conflict`] when the email or
    /// username is already registered.
    async fn register(&self, details: &SignupDetails) -> Result<UserId, Error>;
}
