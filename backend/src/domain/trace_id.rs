//! Request-scoped correlation identifier.
//!
//! The identifier lives in tokio task-local storage so errors and log events
//! can pick it up without it being passed through every signature. Task-locals
//! do not follow work onto other tasks or the blocking pool; use
//! [`TraceId::scope`] or [`TraceId::spawn_blocking`] at those hand-off points.

use std::future::Future;

use tokio::task::JoinError;
use tokio::task_local;
use uuid::Uuid;

/// Response header that carries the trace identifier back to clients.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// Correlation identifier for one inbound request.
///
/// # Examples
/// ```
/// use budgetbite::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
///     .parse()
///     .expect("valid UUID");
/// let observed = TraceId::scope(trace_id, async { TraceId::current() }).await;
/// assert_eq!(observed, Some(trace_id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier in scope for the running task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Drive `fut` with `trace_id` in scope.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }

    /// Run CPU-bound `work` on the blocking pool, carrying the caller's trace.
    ///
    /// The closure sees the same [`TraceId::current`] as the caller, so errors
    /// raised inside it stay correlated.
    pub async fn spawn_blocking<F, T>(work: F) -> Result<T, JoinError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let inherited = Self::current();
        tokio::task::spawn_blocking(move || match inherited {
            Some(id) => CURRENT.sync_scope(id, work),
            None => work(),
        })
        .await
    }
}

impl From<Uuid> for TraceId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
