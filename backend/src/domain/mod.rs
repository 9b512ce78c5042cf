//! Domain entities, services, and ports.
//!
//! Types here are transport agnostic. Inbound adapters map requests into
//! these types and [`Error`] back out; outbound adapters implement the
//! traits in [`ports`].

pub mod auth;
pub mod catalog;
pub mod error;
pub mod login_service;
pub mod ports;
pub mod report;
pub mod report_service;
pub mod role;
pub mod stock;
pub mod stock_service;
pub mod token;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::login_service::{LoginOutcome, LoginService};
pub use self::report_service::{ReportService, REPORT_TTL_SECS};
pub use self::role::{authorize, Role};
pub use self::stock_service::StockService;
pub use self::token::{Claims, TokenError, TokenService, TOKEN_TTL_SECS};

use self::ports::StoreError;

impl From<StoreError> for Error {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Connection { message } => Self::service_unavailable(message),
            StoreError::Query { message } => Self::internal(message),
        }
    }
}

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, Error>;
