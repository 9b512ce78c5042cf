//! Sectors and the material catalog.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Organizational grouping that owns its own stock records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Sector {
    pub id: Uuid,
    pub nome: String,
}

/// Catalog item, sector-independent.
///
/// Mutated only by catalog management, which is outside the ledger; the
/// ledger treats the catalog as append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Material {
    pub id: Uuid,
    pub nome: String,
    /// Unit of measure, e.g. "Resma" or "Metro".
    pub unidade: String,
}
