//! BudgetBite backend library.
//!
//! Account sign-up and login over a credential store, plus an endpoint that
//! runs the budget analysis script and relays its output.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
