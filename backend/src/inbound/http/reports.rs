//! Administrator reporting endpoint.
//!
//! ```text
//! GET /admin/relatorios
//! ```

use actix_web::{get, web};

use crate::domain::report::AggregateReport;
use crate::domain::{authorize, Role};
use crate::inbound::http::bearer::BearerClaims;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Cross-sector aggregate report, cache-served when fresh.
///
/// The role check runs before any cache or ledger access, so a non-admin
/// caller is rejected regardless of cache state.
#[utoipa::path(
    get,
    path = "/admin/relatorios",
    responses(
        (status = 200, description = "Aggregate report", body = AggregateReport),
        (status = 401, description = "Unauthorized", body = crate::inbound::http::error::ApiError),
        (status = 403, description = "Forbidden", body = crate::inbound::http::error::ApiError),
        (status = 500, description = "Internal server error")
    ),
    tags = ["admin"],
    operation_id = "adminReport"
)]
#[get("/relatorios")]
pub async fn admin_report(
    state: web::Data<HttpState>,
    bearer: BearerClaims,
) -> ApiResult<web::Json<AggregateReport>> {
    authorize(bearer.claims(), &[Role::Admin])?;
    let report = state.reports.report().await?;
    Ok(web::Json(report))
}
