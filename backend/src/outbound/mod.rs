//! Outbound adapters implementing the domain ports.

pub mod cache;
pub mod memory;
pub mod persistence;

pub use cache::{MemoryReportCache, RedisReportCache};
pub use memory::MemoryStore;
pub use persistence::DieselStore;
