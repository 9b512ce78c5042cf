//! Server assembly: adapter selection, service wiring, and the route tree.

pub mod config;

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use crate::domain::ports::{CacheError, ReportCache};
use crate::domain::{LoginService, ReportService, StockService, TokenService};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{auth, reports, stock};
use crate::outbound::cache::{MemoryReportCache, RedisReportCache};
use crate::outbound::memory::MemoryStore;
use crate::outbound::persistence::{DbPool, DieselStore, PoolConfig, PoolError};

pub use config::{AppConfig, ConfigError};

/// Startup failures.
#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Build the handler state from configuration, choosing PostgreSQL or the
/// in-memory store and Redis or the in-process cache slot.
pub async fn build_state(config: &AppConfig) -> Result<HttpState, BootError> {
    let tokens = TokenService::new(config.token_secret.clone(), config.token_ttl);

    let cache: Arc<dyn ReportCache> = match &config.redis_url {
        Some(url) => {
            info!(key = %config.report_cache_key, "using redis report cache");
            Arc::new(RedisReportCache::connect(url, config.report_cache_key.clone()).await?)
        }
        None => {
            info!("using in-process report cache");
            Arc::new(MemoryReportCache::new())
        }
    };

    match &config.database_url {
        Some(url) => {
            info!("using postgresql store");
            let pool = DbPool::new(PoolConfig::new(url.clone())).await?;
            let store = Arc::new(DieselStore::new(pool));
            Ok(assemble(tokens, store, cache, config))
        }
        None => {
            info!("no DATABASE_URL; using empty in-memory store");
            Ok(assemble(tokens, Arc::new(MemoryStore::new()), cache, config))
        }
    }
}

fn assemble<S>(
    tokens: TokenService,
    store: Arc<S>,
    cache: Arc<dyn ReportCache>,
    config: &AppConfig,
) -> HttpState
where
    S: crate::domain::ports::UserRepository
        + crate::domain::ports::SectorRepository
        + crate::domain::ports::MaterialRepository
        + crate::domain::ports::StockRepository
        + 'static,
{
    HttpState::new(
        tokens.clone(),
        LoginService::new(store.clone(), tokens),
        StockService::new(store.clone(), store.clone(), cache.clone()),
        ReportService::new(
            store.clone(),
            store.clone(),
            store,
            cache,
            config.report_cache_ttl,
        ),
    )
}

/// Register the API route tree on an actix application.
///
/// Shared by the binary and the HTTP integration tests so both exercise
/// the same scopes and guards.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/auth").service(auth::login))
        .service(
            web::scope("/materiais")
                .service(stock::list_sector_stock)
                .service(stock::list_materials)
                .service(stock::update_stock),
        )
        .service(web::scope("/admin").service(reports::admin_report));
}
