//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod cors;
pub mod error;
pub mod health;
pub mod scripts;
pub mod state;

pub use error::ApiResult;
