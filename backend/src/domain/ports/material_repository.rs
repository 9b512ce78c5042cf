//! Port for material catalog reads.

use async_trait::async_trait;
use uuid::Uuid;

use super::StoreError;
use crate::domain::catalog::Material;

#[async_trait]
pub trait MaterialRepository: Send + Sync {
    /// Full catalog, unscoped.
    async fn list(&self) -> Result<Vec<Material>, StoreError>;

    /// Exact-match catalog lookup.
    async fn find(&self, material_id: Uuid) -> Result<Option<Material>, StoreError>;
}
