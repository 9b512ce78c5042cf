//! Cached aggregate-report use-case.
//!
//! Cache-aside: serve the cached report on hit, recompute on miss, then
//! repopulate. Concurrent misses each recompute independently; there is no
//! single-flight coalescing. No lock spans the ledger read and the cache
//! `set`, so a recompute that started before a concurrent upsert may
//! repopulate the cache with data predating that write. The window is
//! bounded by one recompute latency and heals at the next invalidation or
//! TTL expiry.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, warn};

use super::ports::{MaterialRepository, ReportCache, SectorRepository, StockRepository};
use super::report::{aggregate, AggregateReport};
use super::Error;

/// Default cache lifetime for the aggregate report.
pub const REPORT_TTL_SECS: u64 = 3600;

/// Upper bound of the random TTL jitter, keeping natural expiries from
/// synchronizing across processes.
const TTL_JITTER_SECS: u64 = 60;

/// Computes the cross-sector report and manages its cache slot.
#[derive(Clone)]
pub struct ReportService {
    sectors: Arc<dyn SectorRepository>,
    materials: Arc<dyn MaterialRepository>,
    stock: Arc<dyn StockRepository>,
    cache: Arc<dyn ReportCache>,
    ttl: Duration,
}

impl ReportService {
    pub fn new(
        sectors: Arc<dyn SectorRepository>,
        materials: Arc<dyn MaterialRepository>,
        stock: Arc<dyn StockRepository>,
        cache: Arc<dyn ReportCache>,
        ttl: Duration,
    ) -> Self {
        Self {
            sectors,
            materials,
            stock,
            cache,
            ttl,
        }
    }

    /// Serve the aggregate report, cache-first.
    ///
    /// Cache failures degrade to direct recomputation instead of failing
    /// the request; a failed repopulation still returns the fresh report.
    pub async fn report(&self) -> Result<AggregateReport, Error> {
        match self.cache.get().await {
            Ok(Some(report)) => {
                debug!("report cache hit");
                return Ok(report);
            }
            Ok(None) => debug!("report cache miss"),
            Err(error) => warn!(%error, "report cache read failed; recomputing"),
        }

        let report = self.compute().await?;

        let ttl = self.ttl + Duration::from_secs(rand::thread_rng().gen_range(0..=TTL_JITTER_SECS));
        if let Err(error) = self.cache.set(&report, ttl).await {
            warn!(%error, "report cache repopulation failed");
        }
        Ok(report)
    }

    /// Recompute from the full ledger and catalog, bypassing the cache.
    async fn compute(&self) -> Result<AggregateReport, Error> {
        let setores = self.sectors.list().await?;
        let materiais = self.materials.list().await?;
        let records = self.stock.list_all().await?;
        Ok(aggregate(&setores, &materiais, &records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Material, Sector};
    use crate::domain::ports::{CacheError, MockReportCache, MockStockRepository, StoreError};
    use crate::domain::report::{MaterialTotals, ReportSummary, SectorTotals};
    use crate::domain::stock::StockRecord;
    use crate::domain::ErrorCode;
    use async_trait::async_trait;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    struct FixedSectors(Vec<Sector>);

    #[async_trait]
    impl SectorRepository for FixedSectors {
        async fn list(&self) -> Result<Vec<Sector>, StoreError> {
            Ok(self.0.clone())
        }
    }

    struct FixedMaterials(Vec<Material>);

    #[async_trait]
    impl MaterialRepository for FixedMaterials {
        async fn list(&self) -> Result<Vec<Material>, StoreError> {
            Ok(self.0.clone())
        }

        async fn find(&self, material_id: Uuid) -> Result<Option<Material>, StoreError> {
            Ok(self.0.iter().find(|m| m.id == material_id).cloned())
        }
    }

    fn cached_report() -> AggregateReport {
        AggregateReport {
            summary: ReportSummary {
                total_setores: 1,
                total_itens: 5,
                deficit: 0,
            },
            setores: vec![SectorTotals {
                nome: "TI".into(),
                total_estoque: 5,
                total_necessidade: 5,
            }],
            materiais: vec![MaterialTotals {
                nome: "Monitor 24\"".into(),
                quantidade: 5,
                necessidade: 5,
            }],
        }
    }

    fn ledger_fixture() -> (FixedSectors, FixedMaterials, MockStockRepository) {
        let sector = Sector {
            id: Uuid::new_v4(),
            nome: "Logística".into(),
        };
        let material = Material {
            id: Uuid::new_v4(),
            nome: "Papel A4".into(),
            unidade: "Resma".into(),
        };
        let record = StockRecord {
            setor_id: sector.id,
            material_id: material.id,
            quantidade: 4,
            necessidade: 10,
            atualizado_em: Utc::now(),
        };
        let mut stock = MockStockRepository::new();
        stock
            .expect_list_all()
            .returning(move || Ok(vec![record.clone()]));
        (
            FixedSectors(vec![sector]),
            FixedMaterials(vec![material]),
            stock,
        )
    }

    fn service(
        sectors: FixedSectors,
        materials: FixedMaterials,
        stock: MockStockRepository,
        cache: MockReportCache,
    ) -> ReportService {
        ReportService::new(
            Arc::new(sectors),
            Arc::new(materials),
            Arc::new(stock),
            Arc::new(cache),
            Duration::from_secs(REPORT_TTL_SECS),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn cache_hit_skips_the_ledger() {
        let (sectors, materials, _) = ledger_fixture();
        let mut stock = MockStockRepository::new();
        stock.expect_list_all().never();
        let mut cache = MockReportCache::new();
        cache
            .expect_get()
            .times(1)
            .returning(|| Ok(Some(cached_report())));

        let report = service(sectors, materials, stock, cache)
            .report()
            .await
            .expect("cache hit");
        assert_eq!(report, cached_report());
    }

    #[rstest]
    #[tokio::test]
    async fn cache_miss_recomputes_and_repopulates() {
        let (sectors, materials, stock) = ledger_fixture();
        let mut cache = MockReportCache::new();
        cache.expect_get().times(1).returning(|| Ok(None));
        cache
            .expect_set()
            .times(1)
            .withf(|report, ttl| {
                report.summary.deficit == 6
                    && *ttl >= Duration::from_secs(REPORT_TTL_SECS)
                    && *ttl <= Duration::from_secs(REPORT_TTL_SECS + TTL_JITTER_SECS)
            })
            .returning(|_, _| Ok(()));

        let report = service(sectors, materials, stock, cache)
            .report()
            .await
            .expect("recompute");
        assert_eq!(report.summary.total_itens, 4);
        assert_eq!(report.summary.deficit, 6);
    }

    #[rstest]
    #[tokio::test]
    async fn cache_read_failure_degrades_to_recompute() {
        let (sectors, materials, stock) = ledger_fixture();
        let mut cache = MockReportCache::new();
        cache
            .expect_get()
            .returning(|| Err(CacheError::backend("redis offline")));
        cache
            .expect_set()
            .returning(|_, _| Err(CacheError::backend("redis offline")));

        let report = service(sectors, materials, stock, cache)
            .report()
            .await
            .expect("degrades gracefully");
        assert_eq!(report.summary.deficit, 6);
    }

    #[rstest]
    #[tokio::test]
    async fn ledger_failure_fails_the_report() {
        let (sectors, materials, _) = ledger_fixture();
        let mut stock = MockStockRepository::new();
        stock
            .expect_list_all()
            .returning(|| Err(StoreError::query("relation missing")));
        let mut cache = MockReportCache::new();
        cache.expect_get().returning(|| Ok(None));

        let err = service(sectors, materials, stock, cache)
            .report()
            .await
            .expect_err("ledger failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
