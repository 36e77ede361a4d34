//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, error};

use crate::domain::ports::{AccountPersistenceError, AccountRepository};
use crate::domain::{EmailAddress, UserAccount, Username};

use super::models::{AccountRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

/// Diesel-backed implementation of the [`AccountRepository`] port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountPersistenceError {
    AccountPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> AccountPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            AccountPersistenceError::duplicate(
                info.constraint_name()
                    .unwrap_or("accounts unique index")
                    .to_owned(),
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            AccountPersistenceError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => AccountPersistenceError::query("database query error"),
        _ => AccountPersistenceError::query("database error"),
    }
}

fn row_to_account(row: AccountRow) -> Result<UserAccount, AccountPersistenceError> {
    let id = row.id;
    UserAccount::try_from(row).map_err(|err| {
        error!(account_id = %id, error = %err, "stored account failed validation");
        AccountPersistenceError::query(format!("invalid stored account: {err}"))
    })
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = accounts::table
            .filter(accounts::email.eq(email.as_ref()))
            .select(AccountRow::as_select())
            .first::<AccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_account).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = accounts::table
            .filter(accounts::username.eq(username.as_ref()))
            .select(AccountRow::as_select())
            .first::<AccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_account).transpose()
    }

    async fn insert(&self, account: &UserAccount) -> Result<(), AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(accounts::table)
            .values(NewAccountRow::from(account))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping.
    use super::*;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    struct StubInfo {
        message: &'static str,
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for StubInfo {
        fn message(&self) -> &str {
            self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            Some("accounts")
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(StubInfo {
                message: "stub failure",
                constraint,
            }),
        )
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate_with_constraint() {
        let err = map_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            Some("accounts_username_key"),
        ));
        assert_eq!(
            err,
            AccountPersistenceError::duplicate("accounts_username_key")
        );
    }

    #[rstest]
    fn unique_violation_without_constraint_still_maps_to_duplicate() {
        let err = map_diesel_error(database_error(DatabaseErrorKind::UniqueViolation, None));
        assert!(matches!(err, AccountPersistenceError::Duplicate { .. }));
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        let err = map_diesel_error(database_error(DatabaseErrorKind::ClosedConnection, None));
        assert!(matches!(err, AccountPersistenceError::Connection { .. }));
    }

    #[rstest]
    #[case(DieselError::NotFound)]
    #[case(DieselError::RollbackTransaction)]
    fn other_failures_map_to_query(#[case] error: DieselError) {
        let err = map_diesel_error(error);
        assert!(matches!(err, AccountPersistenceError::Query { .. }));
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, AccountPersistenceError::connection("timed out"));
    }
}
