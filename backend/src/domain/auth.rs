//! Sign-up and login payloads, validated before any port is called.

use zeroize::Zeroizing;

use crate::domain::user::{EmailAddress, FirstName, LastName, UserValidationError, Username};

/// Rejected login payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
}

impl LoginValidationError {
    /// Name of the offending request field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyPassword => "password",
        }
    }
}

/// Rejected sign-up payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignupValidationError {
    /// An identity field was blank.
    #[error(transparent)]
    Field(#[from] UserValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

impl SignupValidationError {
    /// Name of the offending request field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Field(UserValidationError::EmptyFirstname) => "firstname",
            Self::Field(UserValidationError::EmptyLastname) => "lastname",
            Self::Field(UserValidationError::EmptyEmail) => "email",
            Self::Field(UserValidationError::EmptyUsername) => "username",
            Self::Field(UserValidationError::EmptyPasswordHash) | Self::EmptyPassword => {
                "password"
            }
        }
    }
}

/// Username and plaintext password from a login form.
///
/// Only the username is trimmed; the password is compared exactly as typed.
///
/// # Examples
/// ```
/// use budgetbite::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada ", "pw1").unwrap();
/// assert_eq!(creds.username().as_ref(), "ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = Username::new(username).map_err(|_| LoginValidationError::EmptyUsername)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request.
///
/// The plaintext password is held in zeroizing storage and only leaves this
/// type on its way to the password hasher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    firstname: FirstName,
    lastname: LastName,
    email: EmailAddress,
    username: Username,
    password: Zeroizing<String>,
}

impl SignupDetails {
    /// Validate raw sign-up fields.
    ///
    /// # Examples
    /// ```
    /// use budgetbite::domain::SignupDetails;
    ///
    /// let details = SignupDetails::try_from_parts("Ada", "L", "a@x.io", "ada", "pw1").unwrap();
    /// assert_eq!(details.username().as_ref(), "ada");
    /// ```
    pub fn try_from_parts(
        firstname: &str,
        lastname: &str,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, SignupValidationError> {
        let firstname = FirstName::new(firstname)?;
        let lastname = LastName::new(lastname)?;
        let email = EmailAddress::new(email)?;
        let username = Username::new(username)?;
        if password.is_empty() {
            return Err(SignupValidationError::EmptyPassword);
        }
        Ok(Self {
            firstname,
            lastname,
            email,
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Given name.
    pub fn firstname(&self) -> &FirstName {
        &self.firstname
    }

    /// Family name.
    pub fn lastname(&self) -> &LastName {
        &self.lastname
    }

    /// Contact email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Plaintext password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn login_rejects_blank_fields(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  ada  ", "pw1")]
    #[case("grace", " spaced password ")]
    fn login_trims_username_but_not_password(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username().as_ref(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case(LoginValidationError::EmptyUsername, "username")]
    #[case(LoginValidationError::EmptyPassword, "password")]
    fn login_errors_name_their_field(#[case] err: LoginValidationError, #[case] field: &str) {
        assert_eq!(err.field(), field);
    }

    #[rstest]
    #[case(["", "L", "a@x.io", "ada", "pw1"], "firstname")]
    #[case(["Ada", " ", "a@x.io", "ada", "pw1"], "lastname")]
    #[case(["Ada", "L", "", "ada", "pw1"], "email")]
    #[case(["Ada", "L", "a@x.io", "\t", "pw1"], "username")]
    #[case(["Ada", "L", "a@x.io", "ada", ""], "password")]
    fn signup_rejects_blank_fields(#[case] parts: [&str; 5], #[case] field: &str) {
        let [firstname, lastname, email, username, password] = parts;
        let err = SignupDetails::try_from_parts(firstname, lastname, email, username, password)
            .expect_err("blank field must fail");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn signup_trims_identity_fields_but_not_password() {
        let details = SignupDetails::try_from_parts(" Ada ", "L", " a@x.io ", " ada ", " pw1 ")
            .expect("valid details");
        assert_eq!(details.firstname().as_ref(), "Ada");
        assert_eq!(details.email().as_ref(), "a@x.io");
        assert_eq!(details.username().as_ref(), "ada");
        assert_eq!(details.password(), " pw1 ");
    }
}
