//! Redis-backed report cache.
//!
//! Stores the serialized report under a single key (`admin_stats` by
//! default) with `SET EX` so Redis owns expiry. Connection failures
//! surface as [`CacheError::Backend`]; the caller decides whether to
//! degrade or fail.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::bb8::Pool;
use bb8_redis::redis::AsyncCommands;
use bb8_redis::RedisConnectionManager;

use crate::domain::ports::{CacheError, ReportCache};
use crate::domain::report::AggregateReport;

/// Default cache key shared with the admin report endpoint.
pub const DEFAULT_REPORT_KEY: &str = "admin_stats";

/// [`ReportCache`] adapter over a pooled Redis connection.
#[derive(Clone)]
pub struct RedisReportCache {
    pool: Pool<RedisConnectionManager>,
    key: String,
}

impl RedisReportCache {
    /// Connect to Redis at `url` and cache reports under `key`.
    pub async fn connect(url: &str, key: impl Into<String>) -> Result<Self, CacheError> {
        let manager =
            RedisConnectionManager::new(url).map_err(|err| CacheError::backend(err.to_string()))?;
        let pool = Pool::builder()
            .build(manager)
            .await
            .map_err(|err| CacheError::backend(err.to_string()))?;
        Ok(Self {
            pool,
            key: key.into(),
        })
    }

    async fn connection(
        &self,
    ) -> Result<bb8_redis::bb8::PooledConnection<'_, RedisConnectionManager>, CacheError> {
        self.pool
            .get()
            .await
            .map_err(|err| CacheError::backend(err.to_string()))
    }
}

#[async_trait]
impl ReportCache for RedisReportCache {
    async fn get(&self) -> Result<Option<AggregateReport>, CacheError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn
            .get(&self.key)
            .await
            .map_err(|err| CacheError::backend(err.to_string()))?;
        match raw {
            Some(payload) => serde_json::from_str(&payload)
                .map(Some)
                .map_err(|err| CacheError::serialization(err.to_string())),
            None => Ok(None),
        }
    }

    async fn set(&self, report: &AggregateReport, ttl: Duration) -> Result<(), CacheError> {
        let payload = serde_json::to_string(report)
            .map_err(|err| CacheError::serialization(err.to_string()))?;
        let mut conn = self.connection().await?;
        let () = conn
            .set_ex(&self.key, payload, ttl.as_secs().max(1))
            .await
            .map_err(|err| CacheError::backend(err.to_string()))?;
        Ok(())
    }

    async fn invalidate(&self) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let () = conn
            .del(&self.key)
            .await
            .map_err(|err| CacheError::backend(err.to_string()))?;
        Ok(())
    }
}
