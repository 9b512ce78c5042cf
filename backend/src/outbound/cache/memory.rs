//! Single-slot in-memory report cache.
//!
//! Holds at most one serialized report with an expiry deadline. Writes
//! are last-writer-wins; an expired slot reads as a miss and is cleared
//! lazily on the next write or invalidation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{CacheError, ReportCache};
use crate::domain::report::AggregateReport;

struct Slot {
    report: AggregateReport,
    expires_at: Instant,
}

/// Process-local [`ReportCache`] used when no `REDIS_URL` is configured.
#[derive(Clone, Default)]
pub struct MemoryReportCache {
    slot: Arc<RwLock<Option<Slot>>>,
}

impl MemoryReportCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportCache for MemoryReportCache {
    async fn get(&self) -> Result<Option<AggregateReport>, CacheError> {
        let slot = self.slot.read().await;
        Ok(slot
            .as_ref()
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.report.clone()))
    }

    async fn set(&self, report: &AggregateReport, ttl: Duration) -> Result<(), CacheError> {
        let mut slot = self.slot.write().await;
        *slot = Some(Slot {
            report: report.clone(),
            expires_at: Instant::now() + ttl,
        });
        Ok(())
    }

    async fn invalidate(&self) -> Result<(), CacheError> {
        *self.slot.write().await = None;
        Ok(())
    }
}
