//! Cross-sector aggregate report.
//!
//! The report is derived, non-authoritative state: a pure function of the
//! full ledger and the material catalog at computation time. It has no
//! identity of its own and is cached with a TTL plus explicit invalidation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::catalog::{Material, Sector};
use super::stock::StockRecord;

/// Summary statistics over the whole ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Count of all sectors, including those with no stock records.
    pub total_setores: u64,
    /// Sum of `quantidade` across every stock record.
    pub total_itens: u64,
    /// Per-material shortfall `max(0, need − have)`, summed across
    /// materials. Surplus in one sector never offsets shortage in another:
    /// each material's deficit comes from its own aggregated totals only.
    pub deficit: u64,
}

/// Per-sector totals across all materials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectorTotals {
    pub nome: String,
    pub total_estoque: u64,
    pub total_necessidade: u64,
}

/// Per-material totals across all sectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MaterialTotals {
    pub nome: String,
    pub quantidade: u64,
    pub necessidade: u64,
}

/// Derived cross-sector view computed from the full set of stock records
/// plus the material catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AggregateReport {
    pub summary: ReportSummary,
    pub setores: Vec<SectorTotals>,
    pub materiais: Vec<MaterialTotals>,
}

/// Compute the aggregate report.
///
/// A material or sector with zero stock records contributes zero to every
/// sum. Output rows preserve catalog order.
pub fn aggregate(
    setores: &[Sector],
    materiais: &[Material],
    records: &[StockRecord],
) -> AggregateReport {
    let mut by_sector: HashMap<Uuid, (u64, u64)> = HashMap::new();
    let mut by_material: HashMap<Uuid, (u64, u64)> = HashMap::new();
    for record in records {
        let sector = by_sector.entry(record.setor_id).or_default();
        sector.0 += u64::from(record.quantidade);
        sector.1 += u64::from(record.necessidade);
        let material = by_material.entry(record.material_id).or_default();
        material.0 += u64::from(record.quantidade);
        material.1 += u64::from(record.necessidade);
    }

    let setores: Vec<SectorTotals> = setores
        .iter()
        .map(|sector| {
            let (have, need) = by_sector.get(&sector.id).copied().unwrap_or_default();
            SectorTotals {
                nome: sector.nome.clone(),
                total_estoque: have,
                total_necessidade: need,
            }
        })
        .collect();

    let materiais: Vec<MaterialTotals> = materiais
        .iter()
        .map(|material| {
            let (have, need) = by_material.get(&material.id).copied().unwrap_or_default();
            MaterialTotals {
                nome: material.nome.clone(),
                quantidade: have,
                necessidade: need,
            }
        })
        .collect();

    let summary = ReportSummary {
        total_setores: setores.len() as u64,
        total_itens: materiais.iter().map(|m| m.quantidade).sum(),
        deficit: materiais
            .iter()
            .map(|m| m.necessidade.saturating_sub(m.quantidade))
            .sum(),
    };

    AggregateReport {
        summary,
        setores,
        materiais,
    }
}
