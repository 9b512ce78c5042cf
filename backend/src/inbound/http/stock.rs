//! Stock ledger endpoints.
//!
//! ```text
//! GET  /materiais/setor
//! GET  /materiais/lista
//! POST /materiais/update {"material_id":"…","quantidade":4,"necessidade":10}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::catalog::Material;
use crate::domain::stock::{StockRecord, StockWithMaterial};
use crate::domain::{authorize, Error, Role};
use crate::inbound::http::bearer::BearerClaims;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_quantity, parse_uuid};
use crate::inbound::http::ApiResult;

/// Upsert request body. Fields are optional so missing and malformed
/// values produce the structured validation envelope rather than a bare
/// deserialization error.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateStockRequest {
    pub material_id: Option<String>,
    pub quantidade: Option<i64>,
    pub necessidade: Option<i64>,
}

#[derive(Debug)]
struct ParsedUpdate {
    material_id: Uuid,
    quantidade: u32,
    necessidade: u32,
}

fn parse_update_request(payload: UpdateStockRequest) -> Result<ParsedUpdate, Error> {
    Ok(ParsedUpdate {
        material_id: parse_uuid(payload.material_id.as_deref(), "material_id")?,
        quantidade: parse_quantity(payload.quantidade, "quantidade")?,
        necessidade: parse_quantity(payload.necessidade, "necessidade")?,
    })
}

/// Stock records for the caller's sector, materials joined in.
///
/// A caller with no sector affiliation receives `[]` with HTTP 200.
#[utoipa::path(
    get,
    path = "/materiais/setor",
    responses(
        (status = 200, description = "Sector stock listing", body = [StockWithMaterial]),
        (status = 401, description = "Unauthorized", body = crate::inbound::http::error::ApiError),
        (status = 500, description = "Internal server error")
    ),
    tags = ["materiais"],
    operation_id = "listSectorStock"
)]
#[get("/setor")]
pub async fn list_sector_stock(
    state: web::Data<HttpState>,
    bearer: BearerClaims,
) -> ApiResult<web::Json<Vec<StockWithMaterial>>> {
    authorize(bearer.claims(), &[Role::Admin, Role::Sector])?;
    let rows = state.stock.list_for_caller(bearer.claims()).await?;
    Ok(web::Json(rows))
}

/// Full material catalog.
#[utoipa::path(
    get,
    path = "/materiais/lista",
    responses(
        (status = 200, description = "Material catalog", body = [Material]),
        (status = 401, description = "Unauthorized", body = crate::inbound::http::error::ApiError),
        (status = 500, description = "Internal server error")
    ),
    tags = ["materiais"],
    operation_id = "listMaterials"
)]
#[get("/lista")]
pub async fn list_materials(
    state: web::Data<HttpState>,
    bearer: BearerClaims,
) -> ApiResult<web::Json<Vec<Material>>> {
    authorize(bearer.claims(), &[Role::Admin, Role::Sector])?;
    let catalog = state.stock.catalog().await?;
    Ok(web::Json(catalog))
}

/// Upsert the caller's `(sector, material)` stock record.
///
/// Invalidates the report cache before responding.
#[utoipa::path(
    post,
    path = "/materiais/update",
    request_body = UpdateStockRequest,
    responses(
        (status = 200, description = "Upserted record", body = StockRecord),
        (status = 400, description = "Invalid request", body = crate::inbound::http::error::ApiError),
        (status = 401, description = "Unauthorized", body = crate::inbound::http::error::ApiError),
        (status = 403, description = "Caller has no sector", body = crate::inbound::http::error::ApiError),
        (status = 404, description = "Unknown material", body = crate::inbound::http::error::ApiError),
        (status = 500, description = "Internal server error")
    ),
    tags = ["materiais"],
    operation_id = "updateStock"
)]
#[post("/update")]
pub async fn update_stock(
    state: web::Data<HttpState>,
    bearer: BearerClaims,
    payload: web::Json<UpdateStockRequest>,
) -> ApiResult<web::Json<StockRecord>> {
    authorize(bearer.claims(), &[Role::Admin, Role::Sector])?;
    let parsed = parse_update_request(payload.into_inner())?;
    let record = state
        .stock
        .upsert(
            bearer.claims(),
            parsed.material_id,
            parsed.quantidade,
            parsed.necessidade,
        )
        .await?;
    Ok(web::Json(record))
}
