//! Backend entry-point: loads settings, prepares the account store, and
//! serves the HTTP API until SIGINT or SIGTERM.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use budgetbite::inbound::http::health::HealthState;
use budgetbite::settings::AppSettings;

use server::{ServerConfig, connect_database, create_server};

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received SIGINT, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;

    let mut config = ServerConfig::from_settings(&settings)?;
    if let Some(pool) = connect_database(&settings).await {
        config = config.with_db_pool(pool);
    }
    let bind_addr = config.bind_addr();

    let health_state = web::Data::new(HealthState::new());
    let shutdown = CancellationToken::new();
    let server = create_server(health_state.clone(), config, shutdown.clone())?;
    info!(%bind_addr, "listening");

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        shutdown_signal().await;
        health_state.mark_unhealthy();
        shutdown.cancel();
        handle.stop(true).await;
    });

    server.await
}
