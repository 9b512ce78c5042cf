//! Stock ledger use-cases.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use super::catalog::Material;
use super::ports::{MaterialRepository, ReportCache, StockRepository};
use super::stock::{StockRecord, StockWithMaterial};
use super::token::Claims;
use super::Error;

/// Sector-scoped ledger reads and the idempotent upsert.
#[derive(Clone)]
pub struct StockService {
    stock: Arc<dyn StockRepository>,
    materials: Arc<dyn MaterialRepository>,
    cache: Arc<dyn ReportCache>,
}

impl StockService {
    pub fn new(
        stock: Arc<dyn StockRepository>,
        materials: Arc<dyn MaterialRepository>,
        cache: Arc<dyn ReportCache>,
    ) -> Self {
        Self {
            stock,
            materials,
            cache,
        }
    }

    /// Stock records for the caller's sector.
    ///
    /// A caller with no sector affiliation gets an empty list, never an
    /// error: "no sector, nothing to show" is policy, not a failure.
    pub async fn list_for_caller(&self, claims: &Claims) -> Result<Vec<StockWithMaterial>, Error> {
        match claims.setor_id {
            Some(setor_id) => Ok(self.stock.list_by_sector(setor_id).await?),
            None => Ok(Vec::new()),
        }
    }

    /// Full material catalog, unscoped.
    pub async fn catalog(&self) -> Result<Vec<Material>, Error> {
        Ok(self.materials.list().await?)
    }

    /// Overwrite-or-create the caller's `(sector, material)` record, then
    /// synchronously invalidate the report cache.
    ///
    /// The invalidation happens before returning so no subsequent cache
    /// read can observe a report older than this write. If invalidation
    /// fails the record is stored but the call reports an internal error
    /// rather than claiming that guarantee held.
    pub async fn upsert(
        &self,
        claims: &Claims,
        material_id: Uuid,
        quantidade: u32,
        necessidade: u32,
    ) -> Result<StockRecord, Error> {
        let setor_id = claims
            .setor_id
            .ok_or_else(|| Error::forbidden("Usuário sem setor"))?;

        if self.materials.find(material_id).await?.is_none() {
            return Err(Error::not_found("material desconhecido"));
        }

        let record = self
            .stock
            .upsert(setor_id, material_id, quantidade, necessidade)
            .await?;
        debug!(%setor_id, %material_id, quantidade, necessidade, "stock upserted");

        if let Err(error) = self.cache.invalidate().await {
            warn!(%error, "report cache invalidation failed after upsert");
            return Err(Error::internal(format!(
                "stock stored but report cache invalidation failed: {error}"
            )));
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{CacheError, MockReportCache, MockStockRepository, StoreError};
    use crate::domain::{ErrorCode, Role};
    use async_trait::async_trait;
    use chrono::Utc;
    use rstest::rstest;

    struct EmptyCatalog;

    #[async_trait]
    impl MaterialRepository for EmptyCatalog {
        async fn list(&self) -> Result<Vec<Material>, StoreError> {
            Ok(Vec::new())
        }

        async fn find(&self, _material_id: Uuid) -> Result<Option<Material>, StoreError> {
            Ok(None)
        }
    }

    struct KnownMaterial(Material);

    #[async_trait]
    impl MaterialRepository for KnownMaterial {
        async fn list(&self) -> Result<Vec<Material>, StoreError> {
            Ok(vec![self.0.clone()])
        }

        async fn find(&self, material_id: Uuid) -> Result<Option<Material>, StoreError> {
            Ok(Some(self.0.clone()).filter(|material| material.id == material_id))
        }
    }

    fn claims(setor_id: Option<Uuid>) -> Claims {
        Claims {
            id: Uuid::new_v4(),
            role: Role::Sector,
            setor_id,
            exp: i64::MAX,
        }
    }

    fn material() -> Material {
        Material {
            id: Uuid::new_v4(),
            nome: "Cabo de Rede".into(),
            unidade: "Metro".into(),
        }
    }

    fn record(setor_id: Uuid, material_id: Uuid, quantidade: u32, necessidade: u32) -> StockRecord {
        StockRecord {
            setor_id,
            material_id,
            quantidade,
            necessidade,
            atualizado_em: Utc::now(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn caller_without_sector_gets_empty_list_not_error() {
        let mut stock = MockStockRepository::new();
        stock.expect_list_by_sector().never();
        let service = StockService::new(
            Arc::new(stock),
            Arc::new(EmptyCatalog),
            Arc::new(MockReportCache::new()),
        );

        let rows = service
            .list_for_caller(&claims(None))
            .await
            .expect("policy, not failure");
        assert!(rows.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_requires_a_sector() {
        let service = StockService::new(
            Arc::new(MockStockRepository::new()),
            Arc::new(EmptyCatalog),
            Arc::new(MockReportCache::new()),
        );

        let err = service
            .upsert(&claims(None), Uuid::new_v4(), 1, 1)
            .await
            .expect_err("no sector");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_rejects_unknown_material() {
        let service = StockService::new(
            Arc::new(MockStockRepository::new()),
            Arc::new(EmptyCatalog),
            Arc::new(MockReportCache::new()),
        );

        let err = service
            .upsert(&claims(Some(Uuid::new_v4())), Uuid::new_v4(), 1, 1)
            .await
            .expect_err("unknown material");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_invalidates_the_cache_before_returning() {
        let material = material();
        let setor_id = Uuid::new_v4();
        let material_id = material.id;

        let mut stock = MockStockRepository::new();
        stock
            .expect_upsert()
            .withf(move |s, m, q, n| *s == setor_id && *m == material_id && *q == 7 && *n == 9)
            .times(1)
            .returning(move |s, m, q, n| Ok(record(s, m, q, n)));
        let mut cache = MockReportCache::new();
        cache.expect_invalidate().times(1).returning(|| Ok(()));

        let service = StockService::new(
            Arc::new(stock),
            Arc::new(KnownMaterial(material)),
            Arc::new(cache),
        );
        let stored = service
            .upsert(&claims(Some(setor_id)), material_id, 7, 9)
            .await
            .expect("upsert succeeds");
        assert_eq!(stored.quantidade, 7);
        assert_eq!(stored.necessidade, 9);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_invalidation_is_surfaced_not_swallowed() {
        let material = material();
        let material_id = material.id;

        let mut stock = MockStockRepository::new();
        stock
            .expect_upsert()
            .returning(move |s, m, q, n| Ok(record(s, m, q, n)));
        let mut cache = MockReportCache::new();
        cache
            .expect_invalidate()
            .returning(|| Err(CacheError::backend("redis offline")));

        let service = StockService::new(
            Arc::new(stock),
            Arc::new(KnownMaterial(material)),
            Arc::new(cache),
        );
        let err = service
            .upsert(&claims(Some(Uuid::new_v4())), material_id, 1, 2)
            .await
            .expect_err("invalidation failed");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
