//! Signed bearer tokens.
//!
//! A token is `base64url(claims JSON) "." base64url(HMAC-SHA256)` over the
//! encoded claims. Claims are the sole source of identity for the rest of a
//! request; handlers never re-derive role or sector from any other source.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use super::Role;
use super::user::User;

type HmacSha256 = Hmac<Sha256>;

/// Default token lifetime.
pub const TOKEN_TTL_SECS: i64 = 8 * 60 * 60;

/// Identity assertion embedded in a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User identifier.
    pub id: Uuid,
    /// Caller role; immutable for the token's lifetime.
    pub role: Role,
    /// Sector affiliation, absent for administrators.
    pub setor_id: Option<Uuid>,
    /// Expiry as Unix seconds.
    pub exp: i64,
}

impl Claims {
    /// Whether the assertion has passed its expiry instant.
    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }
}

/// Token verification failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Token structure or encoding is not parseable.
    #[error("token is malformed")]
    Malformed,
    /// Signature does not match the claims payload.
    #[error("token signature is invalid")]
    InvalidSignature,
    /// Claims are well formed but past their expiry.
    #[error("token is expired")]
    Expired,
}

/// Issues and verifies signed identity assertions.
///
/// Holds the process-wide signing key; constructed once at startup and
/// shared by the login service and the bearer extractor.
#[derive(Clone)]
pub struct TokenService {
    key: Vec<u8>,
    ttl: Duration,
}

impl TokenService {
    /// Build a service with the given signing key and token lifetime.
    pub fn new(key: impl Into<Vec<u8>>, ttl: Duration) -> Self {
        Self {
            key: key.into(),
            ttl,
        }
    }

    /// Build a service with the default 8 hour lifetime.
    pub fn with_default_ttl(key: impl Into<Vec<u8>>) -> Self {
        Self::new(key, Duration::seconds(TOKEN_TTL_SECS))
    }

    /// Issue a token asserting `user`'s identity, role, and sector.
    pub fn issue(&self, user: &User) -> String {
        let claims = Claims {
            id: user.id,
            role: user.role,
            setor_id: user.setor_id,
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> String {
        // Claims are plain data; serialization cannot fail.
        let payload = serde_json::to_vec(claims).unwrap_or_default();
        let encoded = URL_SAFE_NO_PAD.encode(&payload);
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC can take key of any size");
        mac.update(encoded.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        format!("{encoded}.{signature}")
    }

    /// Validate signature and expiry, returning the embedded claims.
    ///
    /// Uses constant-time comparison for the signature check.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let (encoded, signature) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let signature_bytes = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC can take key of any size");
        mac.update(encoded.as_bytes());
        mac.verify_slice(&signature_bytes)
            .map_err(|_| TokenError::InvalidSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| TokenError::Malformed)?;
        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

        if claims.is_expired() {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    #[cfg(test)]
    pub(crate) fn sign_claims(&self, claims: &Claims) -> String {
        self.sign(claims)
    }
}
