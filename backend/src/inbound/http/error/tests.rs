//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error() -> Error {
    Error::internal("account store error: relation \"accounts\" does not exist")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "secret": "x" }))
}

async fn body_json(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("JSON body")
}

#[rstest]
#[case(Error::invalid_request("username must not be empty"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("Incorrect password"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("Username not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("email or username already exists"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("account store unavailable"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace(internal_error: Error) {
    let response = ResponseError::error_response(&internal_error);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(TRACE_ID)
    );

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "code": "internal_error",
            "message": "Internal server error",
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn conflict_keeps_its_message_and_code() {
    let response = ResponseError::error_response(&Error::conflict("email or username already exists"));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({ "code": "conflict", "message": "email or username already exists" })
    );
}

#[rstest]
#[case(ScriptFailureKind::ExitFailure, "exit_failure", "script exited with an error status")]
#[case(ScriptFailureKind::StderrOutput, "stderr_output", "script reported errors")]
#[case(ScriptFailureKind::TimedOut, "timed_out", "script timed out")]
#[actix_web::test]
async fn script_failures_use_the_script_envelope(
    #[case] kind: ScriptFailureKind,
    #[case] code: &str,
    #[case] description: &str,
) {
    let response = ResponseError::error_response(&ScriptFailure::new(kind));
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body, json!({ "error": description, "code": code }));
}

#[rstest]
#[actix_web::test]
async fn json_errors_become_invalid_requests() {
    let request = TestRequest::default().to_http_request();
    let err = json_error_handler(JsonPayloadError::ContentType, &request);

    let response = err.error_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], "expected application/json body");
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.trace_id(), None);
    assert_eq!(err.details(), None);
}
