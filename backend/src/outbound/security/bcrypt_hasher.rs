//! bcrypt-backed `PasswordHasher`.
//!
//! Hashes use the `$2b$` variant with a per-hash random salt. Work happens on
//! the blocking pool; the caller's trace id follows it there.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{PasswordHash, TraceId};

/// bcrypt password hasher with a fixed cost factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Cost used for existing accounts.
    pub const DEFAULT_COST: u32 = 10;
    /// Lowest cost bcrypt accepts.
    pub const MIN_COST: u32 = 4;
    /// Highest cost bcrypt accepts.
    pub const MAX_COST: u32 = 31;

    /// Create a hasher with `cost`, clamped to bcrypt's supported range.
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(Self::MIN_COST, Self::MAX_COST),
        }
    }

    /// Cost factor in use.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let cost = self.cost;
        let encoded = TraceId::spawn_blocking(move || bcrypt::hash(password.as_str(), cost))
            .await
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        PasswordHash::new(encoded).map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        TraceId::spawn_blocking(move || bcrypt::verify(password.as_str(), &encoded))
            .await
            .map_err(|err| PasswordHashError::verify(err.to_string()))?
            .map_err(|err| PasswordHashError::verify(err.to_string()))
    }
}
