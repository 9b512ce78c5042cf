//! Port for the stock ledger.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use super::StoreError;
use crate::domain::stock::{StockRecord, StockWithMaterial};

/// Sole writer of stock records.
///
/// The store guarantees single-record atomicity for the compound-key
/// upsert; no cross-record transaction is ever required.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StockRepository: Send + Sync {
    /// Stock records for one sector with their materials joined in.
    async fn list_by_sector(&self, setor_id: Uuid) -> Result<Vec<StockWithMaterial>, StoreError>;

    /// Every stock record, unscoped. Feeds the aggregate report.
    async fn list_all(&self) -> Result<Vec<StockRecord>, StoreError>;

    /// Overwrite the `(setor_id, material_id)` record, creating it on first
    /// report. Idempotent: repeating the same call yields the same stored
    /// state.
    async fn upsert(
        &self,
        setor_id: Uuid,
        material_id: Uuid,
        quantidade: u32,
        necessidade: u32,
    ) -> Result<StockRecord, StoreError>;
}
