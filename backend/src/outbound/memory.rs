//! In-memory store adapter.
//!
//! Default wiring when no `DATABASE_URL` is configured, and the fixture
//! store for tests. The `(sector, material)` uniqueness invariant is
//! structural: the ledger is a map keyed by the pair.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::catalog::{Material, Sector};
use crate::domain::ports::{
    MaterialRepository, SectorRepository, StockRepository, StoreError, UserRepository,
};
use crate::domain::stock::{StockRecord, StockWithMaterial};
use crate::domain::user::User;

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    setores: Vec<Sector>,
    materiais: Vec<Material>,
    estoques: HashMap<(Uuid, Uuid), StockRecord>,
}

/// Shared in-memory credential store and stock ledger.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision a user account.
    pub async fn add_user(&self, user: User) {
        self.state.write().await.users.push(user);
    }

    /// Provision a sector.
    pub async fn add_sector(&self, sector: Sector) {
        self.state.write().await.setores.push(sector);
    }

    /// Provision a catalog material.
    pub async fn add_material(&self, material: Material) {
        self.state.write().await.materiais.push(material);
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|user| user.email == email).cloned())
    }
}

#[async_trait]
impl SectorRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Sector>, StoreError> {
        Ok(self.state.read().await.setores.clone())
    }
}

#[async_trait]
impl MaterialRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Material>, StoreError> {
        Ok(self.state.read().await.materiais.clone())
    }

    async fn find(&self, material_id: Uuid) -> Result<Option<Material>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .materiais
            .iter()
            .find(|material| material.id == material_id)
            .cloned())
    }
}

#[async_trait]
impl StockRepository for MemoryStore {
    async fn list_by_sector(&self, setor_id: Uuid) -> Result<Vec<StockWithMaterial>, StoreError> {
        let state = self.state.read().await;
        let mut rows: Vec<StockWithMaterial> = state
            .estoques
            .values()
            .filter(|record| record.setor_id == setor_id)
            .map(|record| {
                let material = state
                    .materiais
                    .iter()
                    .find(|material| material.id == record.material_id)
                    .cloned()
                    .ok_or_else(|| {
                        StoreError::query(format!(
                            "stock record references unknown material {}",
                            record.material_id
                        ))
                    })?;
                Ok(StockWithMaterial {
                    record: record.clone(),
                    material,
                })
            })
            .collect::<Result<_, StoreError>>()?;
        rows.sort_by(|a, b| a.material.nome.cmp(&b.material.nome));
        Ok(rows)
    }

    async fn list_all(&self) -> Result<Vec<StockRecord>, StoreError> {
        Ok(self.state.read().await.estoques.values().cloned().collect())
    }

    async fn upsert(
        &self,
        setor_id: Uuid,
        material_id: Uuid,
        quantidade: u32,
        necessidade: u32,
    ) -> Result<StockRecord, StoreError> {
        let record = StockRecord {
            setor_id,
            material_id,
            quantidade,
            necessidade,
            atualizado_em: Utc::now(),
        };
        self.state
            .write()
            .await
            .estoques
            .insert((setor_id, material_id), record.clone());
        Ok(record)
    }
}
