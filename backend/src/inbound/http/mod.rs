//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod bearer;
pub mod error;
pub mod reports;
pub mod state;
pub mod stock;
pub mod validation;

pub use error::{ApiError, ApiResult};
