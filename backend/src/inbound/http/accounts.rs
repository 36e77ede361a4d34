//! Account API handlers.
//!
//! ```text
//! POST /signup {"firstname":"Ada","lastname":"Lovelace","email":"ada@example.com","username":"ada","password":"pw1"}
//! POST /login {"username":"ada","password":"pw1"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, SignupDetails, SignupValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Sign-up request body for `POST /signup`.
///
/// Missing fields deserialise as empty strings so validation can name them.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SignupRequest {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl TryFrom<&SignupRequest> for SignupDetails {
    type Error = SignupValidationError;

    fn try_from(value: &SignupRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.firstname,
            &value.lastname,
            &value.email,
            &value.username,
            &value.password,
        )
    }
}

/// Login request body for `POST /login`.
///
/// `email` is accepted for compatibility with the login form and ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "success")]
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

fn map_signup_validation_error(err: SignupValidationError) -> Error {
    let field = err.field();
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let field = err.field();
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Email or username already exists", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Account store unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "signup"
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let details = SignupDetails::try_from(&*payload).map_err(map_signup_validation_error)?;
    state.signup.register(&details).await?;
    Ok(web::Json(MessageResponse::new("done")))
}

/// Check a username and password.
///
/// No session is issued; the response only confirms the credentials.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Incorrect password", body = Error),
        (status = 404, description = "Username not found", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Account store unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let credentials = LoginCredentials::try_from(&*payload).map_err(map_login_validation_error)?;
    state.login.authenticate(&credentials).await?;
    Ok(web::Json(MessageResponse::new("success")))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
