//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Conversion into domain types lives in [`super::store`] where
//! role strings and quantity ranges are validated.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{estoques, materiais, setores, usuarios};

/// Row struct for reading from the usuarios table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = usuarios)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub role: String,
    pub setor_id: Option<Uuid>,
}

/// Row struct for reading from the setores table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = setores)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SectorRow {
    pub id: Uuid,
    pub nome: String,
}

/// Row struct for reading from the materiais table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = materiais)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MaterialRow {
    pub id: Uuid,
    pub nome: String,
    pub unidade: String,
}

/// Row struct for reading from the estoques ledger.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = estoques)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StockRow {
    pub setor_id: Uuid,
    pub material_id: Uuid,
    pub quantidade: i64,
    pub necessidade: i64,
    pub atualizado_em: DateTime<Utc>,
}

/// Insertable struct backing the compound-key upsert.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = estoques)]
pub(crate) struct StockUpsertRow {
    pub setor_id: Uuid,
    pub material_id: Uuid,
    pub quantidade: i64,
    pub necessidade: i64,
    pub atualizado_em: DateTime<Utc>,
}
