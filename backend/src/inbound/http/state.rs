//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, ScriptBridge, SignupService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Account registration.
    pub signup: Arc<dyn SignupService>,
    /// Credential checks.
    pub login: Arc<dyn LoginService>,
    /// Script trigger.
    pub script: Arc<dyn ScriptBridge>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(
        signup: Arc<dyn SignupService>,
        login: Arc<dyn LoginService>,
        script: Arc<dyn ScriptBridge>,
    ) -> Self {
        Self {
            signup,
            login,
            script,
        }
    }
}
