//! Driven port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hash computation failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// Stored hash could not be parsed or compared.
        Verify { message: String } => "password verification failed: {message}",
    }
}

/// Salted, deliberately slow one-way hashing.
///
/// Implementations keep CPU-bound work off the async executor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password with a fresh salt.
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` against a stored hash.
    ///
    /// A mismatch is `Ok(false)`; `Err` is reserved for malformed hashes and
    /// executor failures.
    async fn verify(&self, password: &str, hash: &PasswordHash)
    -> Result<bool, PasswordHashError>;
}
