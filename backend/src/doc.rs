//! OpenAPI documentation configuration.
//!
//! Generates the specification served by Swagger UI in debug builds.
//! Registers every REST endpoint, the wire schemas, and the bearer token
//! security scheme.

use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

use crate::domain::Role;
use crate::domain::catalog::{Material, Sector};
use crate::domain::report::{AggregateReport, MaterialTotals, ReportSummary, SectorTotals};
use crate::domain::stock::{StockRecord, StockWithMaterial};
use crate::domain::user::UserProfile;
use crate::inbound::http::auth::{LoginRequest, LoginResponse};
use crate::inbound::http::error::ApiError;
use crate::inbound::http::stock::UpdateStockRequest;
use crate::inbound::http::{auth, reports, stock};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Signed token issued by POST /auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Estoque backend API",
        description = "Per-sector stock ledger with a cached cross-sector report."
    ),
    paths(
        auth::login,
        stock::list_sector_stock,
        stock::list_materials,
        stock::update_stock,
        reports::admin_report,
    ),
    components(schemas(
        LoginRequest,
        LoginResponse,
        UserProfile,
        Role,
        Sector,
        Material,
        StockRecord,
        StockWithMaterial,
        UpdateStockRequest,
        AggregateReport,
        ReportSummary,
        SectorTotals,
        MaterialTotals,
        ApiError,
    )),
    security(("BearerToken" = []))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_covers_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/auth/login",
            "/materiais/setor",
            "/materiais/lista",
            "/materiais/update",
            "/admin/relatorios",
        ] {
            assert!(paths.contains(&expected), "missing path: {expected}");
        }
    }

    #[test]
    fn document_registers_the_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("BearerToken"));
    }
}
