//! PostgreSQL-backed repository adapters using Diesel.
//!
//! One store implements every repository port; the domain services each
//! hold the slice of it they need. Quantities travel as `BIGINT` in the
//! database and are checked back into `u32` on read, so a row mutated
//! outside the application surfaces as a query error instead of a
//! silently wrapped value.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::Role;
use crate::domain::catalog::{Material, Sector};
use crate::domain::ports::{
    MaterialRepository, SectorRepository, StockRepository, StoreError, UserRepository,
};
use crate::domain::stock::{StockRecord, StockWithMaterial};
use crate::domain::user::User;

use super::models::{MaterialRow, SectorRow, StockRow, StockUpsertRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{estoques, materiais, setores, usuarios};

/// Diesel-backed implementation of the repository ports.
#[derive(Clone)]
pub struct DieselStore {
    pool: DbPool,
}

impl DieselStore {
    /// Create a store over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StoreError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> StoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreError::connection("database connection error")
        }
        _ => StoreError::query("database error"),
    }
}

fn decode_quantity(value: i64, column: &str) -> Result<u32, StoreError> {
    u32::try_from(value)
        .map_err(|_| StoreError::query(format!("{column} out of range: {value}")))
}

fn decode_role(value: &str) -> Result<Role, StoreError> {
    match value {
        "ADMIN" => Ok(Role::Admin),
        "SETOR" => Ok(Role::Sector),
        other => Err(StoreError::query(format!("unknown role: {other}"))),
    }
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = decode_role(&row.role)?;
        Ok(Self {
            id: row.id,
            nome: row.nome,
            email: row.email,
            senha_hash: row.senha,
            role,
            setor_id: row.setor_id,
        })
    }
}

impl From<SectorRow> for Sector {
    fn from(row: SectorRow) -> Self {
        Self {
            id: row.id,
            nome: row.nome,
        }
    }
}

impl From<MaterialRow> for Material {
    fn from(row: MaterialRow) -> Self {
        Self {
            id: row.id,
            nome: row.nome,
            unidade: row.unidade,
        }
    }
}

impl TryFrom<StockRow> for StockRecord {
    type Error = StoreError;

    fn try_from(row: StockRow) -> Result<Self, Self::Error> {
        Ok(Self {
            setor_id: row.setor_id,
            material_id: row.material_id,
            quantidade: decode_quantity(row.quantidade, "quantidade")?,
            necessidade: decode_quantity(row.necessidade, "necessidade")?,
            atualizado_em: row.atualizado_em,
        })
    }
}

#[async_trait]
impl UserRepository for DieselStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = usuarios::table
            .filter(usuarios::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(User::try_from).transpose()
    }
}

#[async_trait]
impl SectorRepository for DieselStore {
    async fn list(&self) -> Result<Vec<Sector>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = setores::table
            .order(setores::nome.asc())
            .select(SectorRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Sector::from).collect())
    }
}

#[async_trait]
impl MaterialRepository for DieselStore {
    async fn list(&self) -> Result<Vec<Material>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = materiais::table
            .order(materiais::nome.asc())
            .select(MaterialRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Material::from).collect())
    }

    async fn find(&self, material_id: Uuid) -> Result<Option<Material>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = materiais::table
            .find(material_id)
            .select(MaterialRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Material::from))
    }
}

#[async_trait]
impl StockRepository for DieselStore {
    async fn list_by_sector(&self, setor_id: Uuid) -> Result<Vec<StockWithMaterial>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(StockRow, MaterialRow)> = estoques::table
            .inner_join(materiais::table)
            .filter(estoques::setor_id.eq(setor_id))
            .order(materiais::nome.asc())
            .select((StockRow::as_select(), MaterialRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(stock, material)| {
                Ok(StockWithMaterial {
                    record: StockRecord::try_from(stock)?,
                    material: Material::from(material),
                })
            })
            .collect()
    }

    async fn list_all(&self) -> Result<Vec<StockRecord>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = estoques::table
            .select(StockRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(StockRecord::try_from).collect()
    }

    async fn upsert(
        &self,
        setor_id: Uuid,
        material_id: Uuid,
        quantidade: u32,
        necessidade: u32,
    ) -> Result<StockRecord, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = StockUpsertRow {
            setor_id,
            material_id,
            quantidade: i64::from(quantidade),
            necessidade: i64::from(necessidade),
            atualizado_em: Utc::now(),
        };
        let stored: StockRow = diesel::insert_into(estoques::table)
            .values(&row)
            .on_conflict((estoques::setor_id, estoques::material_id))
            .do_update()
            .set((
                estoques::quantidade.eq(excluded(estoques::quantidade)),
                estoques::necessidade.eq(excluded(estoques::necessidade)),
                estoques::atualizado_em.eq(excluded(estoques::atualizado_em)),
            ))
            .returning(StockRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        StockRecord::try_from(stored)
    }
}
