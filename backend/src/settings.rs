//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `BUDGETBITE_*` environment variables, and an
//! optional configuration file. Every field is optional; accessors apply the
//! defaults.

use std::net::{AddrParseError, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::StderrPolicy;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_CONNECT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_SCRIPT_PATH: &str = "budgetbite_ai2.py";
const DEFAULT_INTERPRETER: &str = "python3";
const DEFAULT_SCRIPT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_SCRIPT_MAX_CONCURRENT: usize = 2;
const DEFAULT_PASSWORD_COST: u32 = 10;

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BUDGETBITE")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it accounts live in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_connect_timeout_secs: Option<u64>,
    /// Comma-separated browser origins allowed to call the API. Unset allows
    /// any origin.
    pub cors_allowed_origins: Option<String>,
    /// Script run by the dashboard endpoint.
    pub script_path: Option<PathBuf>,
    /// Interpreter used to run the script.
    pub interpreter: Option<String>,
    /// Per-run time limit in seconds.
    pub script_timeout_secs: Option<u64>,
    /// Maximum concurrent script runs.
    pub script_max_concurrent: Option<usize>,
    /// Treat stderr output as a warning instead of a failure.
    #[ortho_config(default = false)]
    pub allow_stderr: bool,
    /// bcrypt cost factor for new hashes.
    pub password_cost: Option<u32>,
}

impl AppSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Pool checkout timeout.
    pub fn db_connect_timeout(&self) -> Duration {
        Duration::from_secs(
            self.db_connect_timeout_secs
                .unwrap_or(DEFAULT_DB_CONNECT_TIMEOUT_SECS),
        )
    }

    /// Allowed CORS origins. Empty means any origin.
    pub fn cors_allowed_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Script location.
    pub fn script_path(&self) -> &Path {
        self.script_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SCRIPT_PATH))
    }

    /// Interpreter program.
    pub fn interpreter(&self) -> &str {
        self.interpreter.as_deref().unwrap_or(DEFAULT_INTERPRETER)
    }

    /// Per-run time limit.
    pub fn script_timeout(&self) -> Duration {
        Duration::from_secs(
            self.script_timeout_secs
                .unwrap_or(DEFAULT_SCRIPT_TIMEOUT_SECS),
        )
    }

    /// Concurrency bound for script runs.
    pub fn script_max_concurrent(&self) -> usize {
        self.script_max_concurrent
            .unwrap_or(DEFAULT_SCRIPT_MAX_CONCURRENT)
    }

    /// How stderr output is treated.
    pub fn stderr_policy(&self) -> StderrPolicy {
        StderrPolicy::from_allow_stderr(self.allow_stderr)
    }

    /// bcrypt cost for new hashes.
    pub fn password_cost(&self) -> u32 {
        self.password_cost.unwrap_or(DEFAULT_PASSWORD_COST)
    }
}
