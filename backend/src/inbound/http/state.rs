//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data`. The services
//! own their ports; everything here is constructed once at startup and
//! shared read-only by all request handlers.

use crate::domain::{LoginService, ReportService, StockService, TokenService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub tokens: TokenService,
    pub login: LoginService,
    pub stock: StockService,
    pub reports: ReportService,
}

impl HttpState {
    pub fn new(
        tokens: TokenService,
        login: LoginService,
        stock: StockService,
        reports: ReportService,
    ) -> Self {
        Self {
            tokens,
            login,
            stock,
            reports,
        }
    }
}
