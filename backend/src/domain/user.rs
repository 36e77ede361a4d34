//! User account model.
//!
//! Identity fields are only checked for presence: the sign-up form sends free
//! text and formats are not validated. Each wrapper trims surrounding
//! whitespace and rejects blank input.

use std::fmt;

use uuid::Uuid;

/// Validation errors raised by the account field constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// First name was missing or blank.
    #[error("firstname must not be empty")]
    EmptyFirstname,
    /// Last name was missing or blank.
    #[error("lastname must not be empty")]
    EmptyLastname,
    /// Email was missing or blank.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Username was missing or blank.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Stored password hash was blank.
    #[error("password hash must not be empty")]
    EmptyPasswordHash,
}

/// Stable account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier loaded from storage.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

macro_rules! trimmed_text {
    ($(#[$meta:meta])* $name:ident, $empty:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Trim and validate raw input.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
                let trimmed = raw.as_ref().trim();
                if trimmed.is_empty() {
                    return Err(UserValidationError::$empty);
                }
                Ok(Self(trimmed.to_owned()))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

trimmed_text!(
    /// Unique login name.
    Username,
    EmptyUsername
);
trimmed_text!(
    /// Unique contact address. Format is not validated.
    EmailAddress,
    EmptyEmail
);
trimmed_text!(
    /// Given name.
    FirstName,
    EmptyFirstname
);
trimmed_text!(
    /// Family name.
    LastName,
    EmptyLastname
);

/// One-way password hash in modular crypt format (for example `$2b$10$…`).
///
/// `Debug` never prints the hash.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a hasher or read from storage.
    pub fn new(encoded: impl Into<String>) -> Result<Self, UserValidationError> {
        let encoded = encoded.into();
        if encoded.trim().is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }
        Ok(Self(encoded))
    }

    /// Encoded hash string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Persisted user account.
///
/// ## Invariants
/// - `email` and `username` are unique across accounts.
/// - `password_hash` never holds plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    id: UserId,
    firstname: FirstName,
    lastname: LastName,
    email: EmailAddress,
    username: Username,
    password_hash: PasswordHash,
}

/// Validated parts used to assemble a [`UserAccount`].
#[derive(Debug, Clone)]
pub struct UserAccountParts {
    /// Account identifier.
    pub id: UserId,
    /// Given name.
    pub firstname: FirstName,
    /// Family name.
    pub lastname: LastName,
    /// Unique email.
    pub email: EmailAddress,
    /// Unique username.
    pub username: Username,
    /// Stored password hash.
    pub password_hash: PasswordHash,
}

impl UserAccount {
    /// Assemble an account from validated parts.
    #[must_use]
    pub fn new(parts: UserAccountParts) -> Self {
        let UserAccountParts {
            id,
            firstname,
            lastname,
            email,
            username,
            password_hash,
        } = parts;
        Self {
            id,
            firstname,
            lastname,
            email,
            username,
            password_hash,
        }
    }

    /// Account identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Given name.
    #[must_use]
    pub fn firstname(&self) -> &FirstName {
        &self.firstname
    }

    /// Family name.
    #[must_use]
    pub fn lastname(&self) -> &LastName {
        &self.lastname
    }

    /// Unique email.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Unique username.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}
