//! `ScriptRunner` adapter that launches the interpreter as a child process.
//!
//! The command line is `<interpreter> <script>` built as an argument array;
//! no shell is involved and nothing from the request reaches it. The child
//! runs in the script's directory so relative data files resolve. Runs are
//! bounded by a semaphore, a per-run timeout, and the shutdown token; every
//! exit path that abandons the child drops it, and `kill_on_drop` kills it.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::ProcessOutput;
use crate::domain::ports::{ScriptRunError, ScriptRunner};

/// Fixed interpreter and script pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptCommand {
    interpreter: String,
    script_path: PathBuf,
}

impl ScriptCommand {
    /// Describe `<interpreter> <script_path>`.
    ///
    /// `interpreter` should be a bare program name (looked up on `PATH`) or
    /// an absolute path, since the child's working directory changes.
    pub fn new(interpreter: impl Into<String>, script_path: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
            script_path: script_path.into(),
        }
    }

    /// Interpreter program.
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    /// Script path as configured.
    pub fn script_path(&self) -> &Path {
        &self.script_path
    }

    /// Directory the child runs in, when the script path has one.
    pub fn working_dir(&self) -> Option<&Path> {
        self.script_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
    }

    /// Script argument relative to [`Self::working_dir`].
    fn script_arg(&self) -> &OsStr {
        match (self.working_dir(), self.script_path.file_name()) {
            (Some(_), Some(name)) => name,
            _ => self.script_path.as_os_str(),
        }
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.interpreter);
        command
            .arg(self.script_arg())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = self.working_dir() {
            command.current_dir(dir);
        }
        command
    }
}

/// Resource limits applied to every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLimits {
    /// Wall-clock limit per run.
    pub timeout: Duration,
    /// Maximum runs in flight; further triggers wait for a slot.
    pub max_concurrent: usize,
}

impl Default for ScriptLimits {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(120),
            max_concurrent: 2,
        }
    }
}

/// Child-process implementation of [`ScriptRunner`].
#[derive(Debug, Clone)]
pub struct ProcessScriptRunner {
    command: ScriptCommand,
    timeout: Duration,
    permits: Arc<Semaphore>,
    shutdown: CancellationToken,
}

impl ProcessScriptRunner {
    /// Create a runner. Cancelling `shutdown` kills in-flight children and
    /// rejects new runs.
    pub fn new(command: ScriptCommand, limits: ScriptLimits, shutdown: CancellationToken) -> Self {
        Self {
            command,
            timeout: limits.timeout,
            permits: Arc::new(Semaphore::new(limits.max_concurrent.max(1))),
            shutdown,
        }
    }

    /// Configured command.
    pub fn command(&self) -> &ScriptCommand {
        &self.command
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[async_trait]
impl ScriptRunner for ProcessScriptRunner {
    async fn run(&self) -> Result<ProcessOutput, ScriptRunError> {
        let _permit = tokio::select! {
            biased;
            () = self.shutdown.cancelled() => return Err(ScriptRunError::cancelled()),
            permit = self.permits.acquire() => permit.map_err(|_| ScriptRunError::cancelled())?,
        };

        let child = self
            .command
            .to_command()
            .spawn()
            .map_err(|err| ScriptRunError::spawn(err.to_string()))?;
        debug!(
            pid = ?child.id(),
            interpreter = self.command.interpreter(),
            script = %self.command.script_path().display(),
            "script started"
        );

        let finished = tokio::select! {
            biased;
            () = self.shutdown.cancelled() => return Err(ScriptRunError::cancelled()),
            finished = tokio::time::timeout(self.timeout, child.wait_with_output()) => finished,
        };

        let output = finished
            .map_err(|_| ScriptRunError::timed_out(millis(self.timeout)))?
            .map_err(|err| ScriptRunError::io(err.to_string()))?;

        Ok(ProcessOutput {
            status: output.status.code(),
            stdout: decode(&output.stdout),
            stderr: decode(&output.stderr),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Runs small `sh` scripts from temporary directories.
    use super::*;
    use rstest::{fixture, rstest};
    use std::time::Instant;
    use tempfile::TempDir;

    #[fixture]
    fn workdir() -> TempDir {
        tempfile::tempdir().expect("temporary directory")
    }

    fn write_script(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("job.sh");
        std::fs::write(&path, body).expect("script written");
        path
    }

    fn runner(script: PathBuf, timeout: Duration) -> ProcessScriptRunner {
        ProcessScriptRunner::new(
            ScriptCommand::new("sh", script),
            ScriptLimits {
                timeout,
                max_concurrent: 1,
            },
            CancellationToken::new(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn captures_stdout_of_clean_exit(workdir: TempDir) {
        let script = write_script(&workdir, "printf 42\n");
        let output = runner(script, Duration::from_secs(10))
            .run()
            .await
            .expect("script runs");

        assert_eq!(output.status, Some(0));
        assert_eq!(output.stdout, "42");
        assert!(output.stderr.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn reports_non_zero_exit_and_stderr(workdir: TempDir) {
        let script = write_script(&workdir, "printf 42\necho boom >&2\nexit 3\n");
        let output = runner(script, Duration::from_secs(10))
            .run()
            .await
            .expect("script runs");

        assert_eq!(output.status, Some(3));
        assert_eq!(output.stdout, "42");
        assert_eq!(output.stderr.trim(), "boom");
    }

    #[rstest]
    #[tokio::test]
    async fn runs_in_the_script_directory(workdir: TempDir) {
        std::fs::write(workdir.path().join("data.txt"), "from data").expect("data written");
        let script = write_script(&workdir, "cat data.txt\n");
        let output = runner(script, Duration::from_secs(10))
            .run()
            .await
            .expect("script runs");

        assert_eq!(output.stdout, "from data");
    }

    #[rstest]
    #[tokio::test]
    async fn kills_runs_that_exceed_the_timeout(workdir: TempDir) {
        let script = write_script(&workdir, "sleep 5\n");
        let err = runner(script, Duration::from_millis(100))
            .run()
            .await
            .expect_err("timeout");

        assert_eq!(err, ScriptRunError::TimedOut { millis: 100 });
        assert_eq!(err.to_string(), "script exceeded 100ms time limit");
    }

    #[rstest]
    #[tokio::test]
    async fn single_slot_serialises_concurrent_runs(workdir: TempDir) {
        // `mkdir` is atomic, so an overlapping run finds the marker present.
        let script = write_script(
            &workdir,
            "mkdir running || echo overlap >&2\nsleep 0.3\nrmdir running\nprintf done\n",
        );
        let runner = runner(script, Duration::from_secs(10));

        let started = Instant::now();
        let (first, second) = tokio::join!(runner.run(), runner.run());
        let elapsed = started.elapsed();

        for output in [first, second] {
            let output = output.expect("script runs");
            assert_eq!(output.stdout, "done");
            assert!(output.stderr.is_empty(), "runs overlapped: {}", output.stderr);
        }
        assert!(elapsed >= Duration::from_millis(600), "elapsed {elapsed:?}");
    }

    #[rstest]
    #[tokio::test]
    async fn missing_interpreter_is_a_spawn_error(workdir: TempDir) {
        let script = write_script(&workdir, "printf 42\n");
        let runner = ProcessScriptRunner::new(
            ScriptCommand::new("budgetbite-no-such-interpreter", script),
            ScriptLimits::default(),
            CancellationToken::new(),
        );

        let err = runner.run().await.expect_err("spawn failure");
        assert!(matches!(err, ScriptRunError::Spawn { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn cancelled_token_rejects_runs(workdir: TempDir) {
        let script = write_script(&workdir, "printf 42\n");
        let shutdown = CancellationToken::new();
        let runner = ProcessScriptRunner::new(
            ScriptCommand::new("sh", script),
            ScriptLimits::default(),
            shutdown.clone(),
        );
        shutdown.cancel();

        let err = runner.run().await.expect_err("cancelled");
        assert_eq!(err, ScriptRunError::Cancelled);
    }

    #[rstest]
    #[tokio::test]
    async fn cancelling_mid_run_stops_the_child(workdir: TempDir) {
        let script = write_script(&workdir, "sleep 5\n");
        let shutdown = CancellationToken::new();
        let runner = ProcessScriptRunner::new(
            ScriptCommand::new("sh", script),
            ScriptLimits::default(),
            shutdown.clone(),
        );

        let trigger = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let err = runner.run().await.expect_err("cancelled");
        assert_eq!(err, ScriptRunError::Cancelled);
    }

    #[rstest]
    #[case("budgetbite_ai2.py", None, "budgetbite_ai2.py")]
    #[case("scripts/budgetbite_ai2.py", Some("scripts"), "budgetbite_ai2.py")]
    fn working_dir_and_argument_follow_script_path(
        #[case] path: &str,
        #[case] dir: Option<&str>,
        #[case] arg: &str,
    ) {
        let command = ScriptCommand::new("python3", path);
        assert_eq!(command.working_dir(), dir.map(Path::new));
        assert_eq!(command.script_arg(), OsStr::new(arg));
    }
}
