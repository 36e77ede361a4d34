//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`SignupService`, `LoginService`, `ScriptBridge`) are called
//! by inbound adapters. Driven ports (`AccountRepository`, `PasswordHasher`,
//! `ScriptRunner`) are implemented by outbound adapters. Each driven port
//! exposes a typed error enum so adapters map their failures into predictable
//! variants.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod login_service;
mod password_hasher;
mod script_bridge;
mod script_runner;
mod signup_service;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountPersistenceError, AccountRepository};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use script_bridge::MockScriptBridge;
pub use script_bridge::ScriptBridge;
#[cfg(test)]
pub use script_runner::MockScriptRunner;
pub use script_runner::{ScriptRunError, ScriptRunner};
#[cfg(test)]
pub use signup_service::MockSignupService;
pub use signup_service::SignupService;
