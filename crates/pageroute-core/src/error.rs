//! Errors surfaced by a resolution call.
//!
//! "No page and no redirect" is not an error; see `engine::Resolution::NotFound`.

/// Fatal resolution failure. The engine never retries or falls back on these.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// Page or redirect store could not be queried.
    #[error("store unavailable: {0:#}")]
    Store(#[source] anyhow::Error),
    /// Candidate generation stopped making progress (internal bug guard).
    #[error("candidate generation for {key:?} made no progress after {steps} steps")]
    NoProgress { key: String, steps: usize },
}

impl RouteError {
    pub fn store(err: anyhow::Error) -> Self {
        RouteError::Store(err)
    }

    /// True when the caller should answer with a server error rather than 404.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, RouteError::Store(_))
    }
}
