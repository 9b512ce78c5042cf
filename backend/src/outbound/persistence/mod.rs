//! PostgreSQL persistence adapters.

pub mod models;
pub mod pool;
pub mod schema;
pub mod store;

pub use pool::{DbPool, PoolConfig, PoolError};
pub use store::DieselStore;
