//! HTTP server configuration object and helpers.

use std::io;
use std::net::SocketAddr;

use budgetbite::domain::StderrPolicy;
use budgetbite::outbound::persistence::DbPool;
use budgetbite::outbound::process::{ScriptCommand, ScriptLimits};
use budgetbite::settings::AppSettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) password_cost: u32,
    pub(crate) script: ScriptCommand,
    pub(crate) script_limits: ScriptLimits,
    pub(crate) stderr_policy: StderrPolicy,
    pub(crate) cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Derive the server configuration from loaded settings.
    ///
    /// # Errors
    /// Returns [`io::ErrorKind::InvalidInput`] when the bind address does not
    /// parse.
    pub fn from_settings(settings: &AppSettings) -> io::Result<Self> {
        let bind_addr = settings.bind_addr().map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid bind address: {err}"),
            )
        })?;
        Ok(Self {
            bind_addr,
            db_pool: None,
            password_cost: settings.password_cost(),
            script: ScriptCommand::new(settings.interpreter(), settings.script_path()),
            script_limits: ScriptLimits {
                timeout: settings.script_timeout(),
                max_concurrent: settings.script_max_concurrent(),
            },
            stderr_policy: settings.stderr_policy(),
            cors_origins: settings.cors_allowed_origins(),
        })
    }

    /// Attach a database connection pool for the account store.
    ///
    /// Without one, accounts are kept in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
