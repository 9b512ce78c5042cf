//! Report cache adapters.

pub mod memory;
pub mod redis;

pub use memory::MemoryReportCache;
pub use redis::RedisReportCache;
