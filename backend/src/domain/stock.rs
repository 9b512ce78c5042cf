//! Stock ledger facts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::catalog::Material;

/// The ledger's atomic fact: `(sector, material)` to quantity-on-hand and
/// projected need.
///
/// ## Invariants
/// - At most one record exists per `(setor_id, material_id)` pair; the pair
///   is the record's identity.
/// - Quantities are non-negative by construction; the boundary rejects
///   negative input before it reaches the ledger.
/// - Records are created on first report and updated thereafter; normal
///   operation never deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StockRecord {
    pub setor_id: Uuid,
    pub material_id: Uuid,
    pub quantidade: u32,
    pub necessidade: u32,
    pub atualizado_em: DateTime<Utc>,
}

/// Stock record with its catalog material joined in, as served by the
/// sector listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StockWithMaterial {
    #[serde(flatten)]
    pub record: StockRecord,
    pub material: Material,
}
