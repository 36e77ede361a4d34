//! Internal Diesel row structs for the `accounts` table.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    EmailAddress, FirstName, LastName, PasswordHash, UserAccount, UserAccountParts, UserId,
    UserValidationError, Username,
};

use super::schema::accounts;

/// Row read from `accounts`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    #[expect(dead_code, reason = "selected for parity with the table definition")]
    pub created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for UserAccount {
    type Error = UserValidationError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(UserAccount::new(UserAccountParts {
            id: UserId::from_uuid(row.id),
            firstname: FirstName::new(row.firstname)?,
            lastname: LastName::new(row.lastname)?,
            email: EmailAddress::new(row.email)?,
            username: Username::new(row.username)?,
            password_hash: PasswordHash::new(row.password_hash)?,
        }))
    }
}

/// Insertable row for new accounts. `created_at` uses the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub firstname: &'a str,
    pub lastname: &'a str,
    pub email: &'a str,
    pub username: &'a str,
    pub password_hash: &'a str,
}

impl<'a> From<&'a UserAccount> for NewAccountRow<'a> {
    fn from(account: &'a UserAccount) -> Self {
        Self {
            id: *account.id().as_uuid(),
            firstname: account.firstname().as_ref(),
            lastname: account.lastname().as_ref(),
            email: account.email().as_ref(),
            username: account.username().as_ref(),
            password_hash: account.password_hash().as_str(),
        }
    }
}
