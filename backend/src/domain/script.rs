//! Script run results and their classification.
//!
//! A run ends in one of three outcomes. Which one depends on the exit status
//! and, under [`StderrPolicy::Strict`], on whether anything reached stderr.
//! Failures are reported to clients through [`ScriptFailure`], which carries a
//! stable description; raw stderr stays in the server logs.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Captured result of one finished child process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Exit code, or `None` when the child was terminated by a signal.
    pub status: Option<i32>,
    /// Captured standard output, lossily decoded as UTF-8.
    pub stdout: String,
    /// Captured standard error, lossily decoded as UTF-8.
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the child exited with status zero.
    #[must_use]
    pub fn exited_cleanly(&self) -> bool {
        self.status == Some(0)
    }
}

/// How stderr output affects an otherwise successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StderrPolicy {
    /// Any stderr output fails the run.
    #[default]
    Strict,
    /// Stderr is logged and ignored.
    Lenient,
}

impl StderrPolicy {
    /// Select the policy from the `allow_stderr` setting.
    #[must_use]
    pub fn from_allow_stderr(allow_stderr: bool) -> Self {
        if allow_stderr {
            Self::Lenient
        } else {
            Self::Strict
        }
    }
}

/// Classified result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOutcome {
    /// Exit status zero and stderr acceptable under the policy.
    Succeeded {
        /// Standard output, verbatim.
        stdout: String,
    },
    /// Non-zero exit or termination by signal. Stdout is discarded.
    ExitFailure {
        /// Exit code, if the child exited normally.
        status: Option<i32>,
        /// Captured stderr.
        stderr: String,
    },
    /// Exit status zero but stderr was written under the strict policy.
    StderrWritten {
        /// Captured stderr.
        stderr: String,
    },
}

impl ScriptOutcome {
    /// Classify a finished run.
    ///
    /// # Examples
    /// ```
    /// use budgetbite::domain::{ProcessOutput, ScriptOutcome, StderrPolicy};
    ///
    /// let output = ProcessOutput {
    ///     status: Some(0),
    ///     stdout: "42".into(),
    ///     stderr: String::new(),
    /// };
    /// assert_eq!(
    ///     ScriptOutcome::classify(output, StderrPolicy::Strict),
    ///     ScriptOutcome::Succeeded { stdout: "42".into() },
    /// );
    /// ```
    #[must_use]
    pub fn classify(output: ProcessOutput, policy: StderrPolicy) -> Self {
        let ProcessOutput {
            status,
            stdout,
            stderr,
        } = output;
        if status != Some(0) {
            return Self::ExitFailure { status, stderr };
        }
        match policy {
            StderrPolicy::Strict if !stderr.is_empty() => Self::StderrWritten { stderr },
            _ => Self::Succeeded { stdout },
        }
    }
}

/// Stable failure category returned to clients as `code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScriptFailureKind {
    /// The script exited with a non-zero status.
    ExitFailure,
    /// The script wrote to stderr.
    StderrOutput,
    /// The interpreter could not be started or its output not collected.
    SpawnFailed,
    /// The run exceeded its time limit and was killed.
    TimedOut,
    /// The run was stopped because the server is shutting down.
    Cancelled,
}

impl ScriptFailureKind {
    /// Client-facing description for this category.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::ExitFailure => "script exited with an error status",
            Self::StderrOutput => "script reported errors",
            Self::SpawnFailed => "script could not be started",
            Self::TimedOut => "script timed out",
            Self::Cancelled => "script run was cancelled",
        }
    }
}

impl fmt::Display for ScriptFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Failed script run as seen by inbound adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct ScriptFailure {
    kind: ScriptFailureKind,
}

impl ScriptFailure {
    /// Wrap a failure category.
    #[must_use]
    pub fn new(kind: ScriptFailureKind) -> Self {
        Self { kind }
    }

    /// Failure category.
    #[must_use]
    pub fn kind(&self) -> ScriptFailureKind {
        self.kind
    }

    /// Client-facing description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        self.kind.description()
    }
}

impl From<ScriptFailureKind> for ScriptFailure {
    fn from(kind: ScriptFailureKind) -> Self {
        Self::new(kind)
    }
}
