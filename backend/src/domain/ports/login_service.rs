//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this port to authenticate credentials without
//! importing persistence or hashing adapters, so handler tests can substitute
//! a test double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated account id.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when the username is
    /// unknown and [`crate::domain::ErrorCode::Unauthorized`] when the
    /// password does not match.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
