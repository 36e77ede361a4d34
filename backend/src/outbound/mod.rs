//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL account store via Diesel, plus an in-memory
//!   fallback.
//! - **security**: bcrypt password hashing.
//! - **process**: the external script runner.
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod persistence;
pub mod process;
pub mod security;
