//! Driven port for launching the configured external script.

use async_trait::async_trait;

use crate::domain::ProcessOutput;

use super::define_port_error;

define_port_error! {
    /// Errors raised before a run produced an exit status.
    pub enum ScriptRunError {
        /// The interpreter process could not be started.
        Spawn { message: String } => "failed to spawn script: {message}",
        /// Output collection failed after the process started.
        Io { message: String } => "failed to collect script output: {message}",
        /// The run exceeded its time limit; the child was killed.
        TimedOut { millis: u64 } => "script exceeded {millis}ms time limit",
        /// The run was cancelled during shutdown; the child was killed.
        Cancelled => "script run cancelled",
    }
}

/// Runs the server-configured script to completion.
///
/// The command line is fixed by the adapter's configuration; callers cannot
/// influence it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    /// Launch the script and wait for it to exit.
    async fn run(&self) -> Result<ProcessOutput, ScriptRunError>;
}
