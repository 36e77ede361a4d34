//! Builders for the HTTP state and the database connection.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use budgetbite::domain::ports::{AccountRepository, LoginService, SignupService};
use budgetbite::domain::{AccountService, ScriptBridgeService};
use budgetbite::inbound::http::state::HttpState;
use budgetbite::outbound::persistence::{
    DbPool, DieselAccountRepository, InMemoryAccountRepository, PoolConfig, run_pending_migrations,
};
use budgetbite::outbound::process::ProcessScriptRunner;
use budgetbite::outbound::security::BcryptPasswordHasher;
use budgetbite::settings::AppSettings;

use super::ServerConfig;

/// Prepare the account database and its connection pool.
///
/// Returns `None` only when no URL is configured; the caller then serves
/// accounts from memory. A configured database that cannot be reached still
/// yields a lazily connecting pool, so account requests fail with
/// `service_unavailable` until it comes back.
pub async fn connect_database(settings: &AppSettings) -> Option<DbPool> {
    let Some(url) = settings.database_url() else {
        warn!("no database configured; accounts are kept in memory");
        return None;
    };

    match run_pending_migrations(url).await {
        Ok(applied) => info!(applied, "database migrations complete"),
        Err(err) => error!(error = %err, "database migrations failed"),
    }

    let config = PoolConfig::new(url)
        .with_max_size(settings.db_max_connections())
        .with_connection_timeout(settings.db_connect_timeout());
    match DbPool::new(config.clone()).await {
        Ok(pool) => {
            info!("connected to account database");
            Some(pool)
        }
        Err(err) => {
            error!(error = %err, "database unreachable; connecting on demand");
            Some(DbPool::connect_lazy(config))
        }
    }
}

fn account_service<R>(repo: R, cost: u32) -> Arc<AccountService<R, BcryptPasswordHasher>>
where
    R: AccountRepository + 'static,
{
    Arc::new(AccountService::new(
        Arc::new(repo),
        Arc::new(BcryptPasswordHasher::new(cost)),
    ))
}

fn build_account_ports(
    config: &ServerConfig,
) -> (Arc<dyn SignupService>, Arc<dyn LoginService>) {
    match &config.db_pool {
        Some(pool) => {
            let service =
                account_service(DieselAccountRepository::new(pool.clone()), config.password_cost);
            (service.clone(), service)
        }
        None => {
            let service = account_service(InMemoryAccountRepository::new(), config.password_cost);
            (service.clone(), service)
        }
    }
}

/// Assemble the handler state. Cancelling `shutdown` stops script runs.
pub fn build_http_state(config: &ServerConfig, shutdown: CancellationToken) -> HttpState {
    let (signup, login) = build_account_ports(config);
    let runner = ProcessScriptRunner::new(config.script.clone(), config.script_limits, shutdown);
    let script = Arc::new(ScriptBridgeService::new(
        Arc::new(runner),
        config.stderr_policy,
    ));
    HttpState::new(signup, login, script)
}
