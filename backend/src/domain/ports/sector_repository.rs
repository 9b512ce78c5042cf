//! Port for sector reads.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::catalog::Sector;

#[async_trait]
pub trait SectorRepository: Send + Sync {
    /// All sectors, unscoped. Feeds the aggregate report.
    async fn list(&self) -> Result<Vec<Sector>, StoreError>;
}
