//! Port for the aggregate-report cache.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::report::AggregateReport;

/// Errors surfaced by the caching adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// Cache backend is unavailable or timing out.
    #[error("report cache backend failure: {message}")]
    Backend { message: String },
    /// Serialization of cached content failed.
    #[error("report cache serialization failed: {message}")]
    Serialization { message: String },
}

impl CacheError {
    /// Backend-level failure.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Serialization failure.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

/// Single shared cache slot for the aggregate report.
///
/// One report, not partitioned per caller: the report is not sector-scoped.
/// `set` is last-writer-wins; there is no partial update and no coalescing
/// of concurrent misses. `get` never returns a report older than the last
/// successful `set`, though under race it may return one predating a very
/// recent upsert whose invalidation lost to an in-flight recompute.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReportCache: Send + Sync {
    /// Read the cached report; `None` is a miss.
    async fn get(&self) -> Result<Option<AggregateReport>, CacheError>;

    /// Store a report for at most `ttl`.
    async fn set(&self, report: &AggregateReport, ttl: Duration) -> Result<(), CacheError>;

    /// Discard the cached report so the next read recomputes.
    async fn invalidate(&self) -> Result<(), CacheError>;
}
