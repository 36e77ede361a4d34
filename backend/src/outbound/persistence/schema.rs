//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered user accounts.
    ///
    /// `email` and `username` each carry a unique index.
    accounts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Given name.
        firstname -> Varchar,
        /// Family name.
        lastname -> Varchar,
        /// Contact email (unique).
        email -> Varchar,
        /// Login name (unique).
        username -> Varchar,
        /// bcrypt hash in modular crypt format.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}
