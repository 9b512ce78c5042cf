//! Domain ports for the hexagonal boundary.
//!
//! Services depend on these traits only; adapters under `outbound` provide
//! PostgreSQL, Redis, and in-memory implementations.

mod material_repository;
mod report_cache;
mod sector_repository;
mod stock_repository;
mod user_repository;

pub use material_repository::MaterialRepository;
#[cfg(test)]
pub use report_cache::MockReportCache;
pub use report_cache::{CacheError, ReportCache};
pub use sector_repository::SectorRepository;
#[cfg(test)]
pub use stock_repository::MockStockRepository;
pub use stock_repository::StockRepository;
pub use user_repository::UserRepository;

/// Failures surfaced by store-backed repositories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store cannot be reached or a connection could not be checked out.
    #[error("store connection failure: {message}")]
    Connection { message: String },
    /// The store rejected the operation or returned malformed data.
    #[error("store query failure: {message}")]
    Query { message: String },
}

impl StoreError {
    /// Connection-level failure.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Query-level failure.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}
