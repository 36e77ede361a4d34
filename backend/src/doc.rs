//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the account, script, and health endpoints together
//! with their request, response, and error schemas. The document is served
//! by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, ScriptFailureKind};
use crate::inbound::http::accounts::{LoginRequest, MessageResponse, SignupRequest};
use crate::inbound::http::error::ScriptErrorBody;
use crate::inbound::http::scripts::ScriptResultResponse;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "BudgetBite backend API",
        description = "Account sign-up and login, budget script trigger, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::signup,
        crate::inbound::http::accounts::login,
        crate::inbound::http::scripts::run_python_script,
        crate::inbound::http::scripts::dashboard,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SignupRequest,
        LoginRequest,
        MessageResponse,
        ScriptResultResponse,
        ScriptErrorBody,
        ScriptFailureKind,
        Error,
        ErrorCode
    )),
    tags(
        (name = "accounts", description = "Account registration and login"),
        (name = "scripts", description = "Budget analysis script"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
