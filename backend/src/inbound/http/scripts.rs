//! Script trigger handlers.
//!
//! ```text
//! POST /run-python-script
//! POST /dashboard
//! ```
//!
//! Both routes run the configured script once and relay its stdout. Failures
//! use the `{error, code}` envelope from [`ScriptErrorBody`].
//!
//! [`ScriptErrorBody`]: crate::inbound::http::error::ScriptErrorBody

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ScriptFailure;
use crate::inbound::http::state::HttpState;

/// Successful script run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ScriptResultResponse {
    /// Standard output of the script, verbatim.
    #[schema(example = "42")]
    pub result: String,
}

async fn trigger(state: &HttpState) -> Result<web::Json<ScriptResultResponse>, ScriptFailure> {
    let result = state.script.trigger().await?;
    Ok(web::Json(ScriptResultResponse { result }))
}

/// Run the budget script and return its output.
#[utoipa::path(
    post,
    path = "/run-python-script",
    responses(
        (status = 200, description = "Script output", body = ScriptResultResponse),
        (status = 500, description = "Script failed", body = crate::inbound::http::error::ScriptErrorBody)
    ),
    tags = ["scripts"],
    operation_id = "runPythonScript"
)]
#[post("/run-python-script")]
pub async fn run_python_script(
    state: web::Data<HttpState>,
) -> Result<web::Json<ScriptResultResponse>, ScriptFailure> {
    trigger(&state).await
}

/// Dashboard alias for [`run_python_script`].
#[utoipa::path(
    post,
    path = "/dashboard",
    responses(
        (status = 200, description = "Script output", body = ScriptResultResponse),
        (status = 500, description = "Script failed", body = crate::inbound::http::error::ScriptErrorBody)
    ),
    tags = ["scripts"],
    operation_id = "dashboard"
)]
#[post("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
) -> Result<web::Json<ScriptResultResponse>, ScriptFailure> {
    trigger(&state).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ScriptFailureKind;
    use crate::domain::ports::{MockLoginService, MockScriptBridge, MockSignupService};

    async fn call(uri: &str, bridge: MockScriptBridge) -> (StatusCode, Value) {
        let state = HttpState::new(
            Arc::new(MockSignupService::new()),
            Arc::new(MockLoginService::new()),
            Arc::new(bridge),
        );
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(run_python_script)
                .service(dashboard),
        )
        .await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::post().uri(uri).to_request())
                .await;
        let status = response.status();
        let bytes = actix_test::read_body(response).await;
        (status, serde_json::from_slice(&bytes).expect("JSON body"))
    }

    #[rstest]
    #[case("/run-python-script")]
    #[case("/dashboard")]
    #[actix_web::test]
    async fn stdout_is_relayed_verbatim(#[case] uri: &str) {
        let mut bridge = MockScriptBridge::new();
        bridge
            .expect_trigger()
            .times(1)
            .return_once(|| Ok("42".to_owned()));

        let (status, body) = call(uri, bridge).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "result": "42" }));
    }

    #[rstest]
    #[case(ScriptFailureKind::ExitFailure, "exit_failure")]
    #[case(ScriptFailureKind::StderrOutput, "stderr_output")]
    #[case(ScriptFailureKind::SpawnFailed, "spawn_failed")]
    #[case(ScriptFailureKind::TimedOut, "timed_out")]
    #[case(ScriptFailureKind::Cancelled, "cancelled")]
    #[actix_web::test]
    async fn failures_return_500_with_code(#[case] kind: ScriptFailureKind, #[case] code: &str) {
        let mut bridge = MockScriptBridge::new();
        bridge
            .expect_trigger()
            .return_once(move || Err(ScriptFailure::new(kind)));

        let (status, body) = call("/run-python-script", bridge).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], code);
        assert_eq!(body["error"], kind.description());
    }
}
