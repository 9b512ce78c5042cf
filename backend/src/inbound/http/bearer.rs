//! Bearer-token extraction for HTTP handlers.
//!
//! Verifies the `Authorization: Bearer` header into domain [`Claims`] so
//! handlers never touch raw headers. The claims are the sole source of
//! identity for the rest of the request.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::domain::{Claims, Error, TokenError};
use crate::inbound::http::state::HttpState;

use super::error::ApiError;

/// Verified token claims, extracted per request.
#[derive(Debug, Clone)]
pub struct BearerClaims(pub Claims);

impl BearerClaims {
    /// The embedded claims.
    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("Acesso negado"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("Token inválido"))?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("Token inválido"))
}

fn verify(req: &HttpRequest) -> Result<BearerClaims, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HttpState missing from app data"))?;
    let token = bearer_token(req)?;
    let claims = state.tokens.verify(token).map_err(|error| match error {
        TokenError::Malformed | TokenError::InvalidSignature | TokenError::Expired => {
            Error::unauthorized("Token inválido")
        }
    })?;
    Ok(BearerClaims(claims))
}

impl FromRequest for BearerClaims {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(verify(req).map_err(ApiError::from))
    }
}
