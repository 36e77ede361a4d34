//! Script bridge service.
//!
//! Runs the configured script through a [`ScriptRunner`], classifies the
//! result, and logs raw stderr so only stable descriptions reach clients.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{ScriptBridge, ScriptRunError, ScriptRunner};
use crate::domain::{ScriptFailure, ScriptFailureKind, ScriptOutcome, StderrPolicy};

/// Implements the [`ScriptBridge`] driving port.
#[derive(Clone)]
pub struct ScriptBridgeService<R> {
    runner: Arc<R>,
    policy: StderrPolicy,
}

impl<R> ScriptBridgeService<R> {
    /// Create a bridge over `runner` that applies `policy` to stderr.
    pub fn new(runner: Arc<R>, policy: StderrPolicy) -> Self {
        Self { runner, policy }
    }
}

fn run_error_kind(err: &ScriptRunError) -> ScriptFailureKind {
    match err {
        ScriptRunError::Spawn { .. } | ScriptRunError::Io { .. } => ScriptFailureKind::SpawnFailed,
        ScriptRunError::TimedOut { .. } => ScriptFailureKind::TimedOut,
        ScriptRunError::Cancelled => ScriptFailureKind::Cancelled,
    }
}

#[async_trait]
impl<R> ScriptBridge for ScriptBridgeService<R>
where
    R: ScriptRunner,
{
    async fn trigger(&self) -> Result<String, ScriptFailure> {
        let output = self.runner.run().await.map_err(|err| {
            error!(error = %err, "script run failed");
            ScriptFailure::new(run_error_kind(&err))
        })?;

        if self.policy == StderrPolicy::Lenient && !output.stderr.is_empty() {
            warn!(stderr = %output.stderr, "script wrote to stderr");
        }

        match ScriptOutcome::classify(output, self.policy) {
            ScriptOutcome::Succeeded { stdout } => {
                info!(bytes = stdout.len(), "script completed");
                Ok(stdout)
            }
            ScriptOutcome::ExitFailure { status, stderr } => {
                error!(?status, stderr = %stderr, "script exited with failure");
                Err(ScriptFailureKind::ExitFailure.into())
            }
            ScriptOutcome::StderrWritten { stderr } => {
                error!(stderr = %stderr, "script wrote to stderr");
                Err(ScriptFailureKind::StderrOutput.into())
            }
        }
    }
}
