//! Cross-origin policy for the browser frontend.
//!
//! The signup and login pages post from their own dev-server origin, so the
//! API answers preflights for `GET` and `POST` with a JSON body.

use actix_cors::Cors;
use actix_web::http::Method;

use crate::domain::TRACE_ID_HEADER;

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Build the CORS middleware.
///
/// An empty list, or one containing `*`, allows any origin.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use budgetbite::inbound::http::cors::cors_policy;
///
/// let origins = vec!["http://localhost:3000".to_owned()];
/// let _app = App::new().wrap(cors_policy(&origins));
/// ```
pub fn cors_policy(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods([Method::GET, Method::POST])
        .allowed_headers(["content-type", "accept", TRACE_ID_HEADER])
        .expose_headers([TRACE_ID_HEADER])
        .max_age(PREFLIGHT_MAX_AGE_SECS);

    if allowed_origins.is_empty() || allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_any_origin();
    }
    allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
