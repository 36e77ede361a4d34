//! Driving port for the script trigger endpoint.

use async_trait::async_trait;

use crate::domain::ScriptFailure;

/// Domain use-case port that runs the script and relays its output.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScriptBridge: Send + Sync {
    /// Run the script once and return its stdout verbatim.
    async fn trigger(&self) -> Result<String, ScriptFailure>;
}
