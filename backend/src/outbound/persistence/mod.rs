//! Account persistence adapters.
//!
//! Two implementations of [`crate::domain::ports::AccountRepository`]:
//!
//! - [`DieselAccountRepository`]: PostgreSQL via Diesel, `diesel-async`, and a
//!   `bb8` pool. Row structs (`models.rs`) and the table definition
//!   (`schema.rs`) stay private to this module.
//! - [`InMemoryAccountRepository`]: process-local store used when no database
//!   is configured or the database is unreachable at start-up.
//!
//! # Example
//!
//! ```ignore
//! use budgetbite::outbound::persistence::{DbPool, DieselAccountRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/budgetbite")).await?;
//! let repo = DieselAccountRepository::new(pool);
//! ```

mod diesel_account_repository;
mod in_memory_account_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use in_memory_account_repository::InMemoryAccountRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
