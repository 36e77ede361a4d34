//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::connect_database;

use state_builders::build_http_state;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tokio_util::sync::CancellationToken;

use budgetbite::Trace;
#[cfg(debug_assertions)]
use budgetbite::doc::ApiDoc;
use budgetbite::inbound::http::accounts::{login, signup};
use budgetbite::inbound::http::cors::cors_policy;
use budgetbite::inbound::http::error::json_error_handler;
use budgetbite::inbound::http::health::{HealthState, live, ready};
use budgetbite::inbound::http::scripts::{dashboard, run_python_script};
use budgetbite::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    cors_origins: &[String],
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(cors_policy(cors_origins))
        .wrap(Trace)
        .service(signup)
        .service(login)
        .service(run_python_script)
        .service(dashboard)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server.
///
/// Signal handling is left to the caller, which drains the server through
/// [`actix_web::dev::ServerHandle::stop`] and cancels `shutdown` to stop
/// in-flight script runs.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    shutdown: CancellationToken,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config, shutdown));
    let cors_origins = config.cors_origins.clone();

    let server = HttpServer::new(move || {
        build_app(
            server_health_state.clone(),
            http_state.clone(),
            &cors_origins,
        )
    })
    .disable_signals()
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
