//! Domain primitives, services, and ports.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! adapters, and the services that implement the driving ports. Keep types
//! immutable and document invariants in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - TraceId: request correlation identifier.
//! - UserAccount and its field types.
//! - SignupDetails / LoginCredentials: validated auth inputs.
//! - AccountService: sign-up and login.
//! - ScriptBridgeService and the script outcome types.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod ports;
pub mod script;
pub mod script_bridge_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::{
    AccountService, DUPLICATE_ACCOUNT_MESSAGE, INCORRECT_PASSWORD_MESSAGE,
    UNKNOWN_USERNAME_MESSAGE,
};
pub use self::auth::{LoginCredentials, LoginValidationError, SignupDetails, SignupValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::script::{
    ProcessOutput, ScriptFailure, ScriptFailureKind, ScriptOutcome, StderrPolicy,
};
pub use self::script_bridge_service::ScriptBridgeService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, FirstName, LastName, PasswordHash, UserAccount, UserAccountParts, UserId,
    UserValidationError, Username,
};
