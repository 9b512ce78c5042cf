//! Process configuration read from the environment.
//!
//! Every knob has a default except the token secret, which in release
//! builds must be provided explicitly. Debug builds fall back to an
//! ephemeral random secret so local runs work out of the box; tokens
//! then die with the process.

use std::env;
use std::time::Duration;

use chrono::Duration as TokenTtl;
use tracing::warn;

use crate::domain::token::TOKEN_TTL_SECS;
use crate::domain::REPORT_TTL_SECS;
use crate::outbound::cache::redis::DEFAULT_REPORT_KEY;

/// Default HTTP port.
const DEFAULT_PORT: u16 = 3001;

/// Configuration errors raised during startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `TOKEN_SECRET` is required in release builds.
    #[error("TOKEN_SECRET must be set")]
    MissingTokenSecret,
    /// An environment variable holds a value that cannot be parsed.
    #[error("invalid value for {name}: {message}")]
    Invalid { name: String, message: String },
}

impl ConfigError {
    fn invalid(name: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Runtime configuration assembled from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub token_secret: Vec<u8>,
    pub token_ttl: TokenTtl,
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    pub report_cache_ttl: Duration,
    pub report_cache_key: String,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a numeric variable fails to parse or
    /// when `TOKEN_SECRET` is absent in a release build.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_var("PORT", DEFAULT_PORT)?;
        let token_ttl = TokenTtl::seconds(parse_var("TOKEN_TTL_SECS", TOKEN_TTL_SECS)?);
        let report_cache_ttl =
            Duration::from_secs(parse_var("REPORT_CACHE_TTL_SECS", REPORT_TTL_SECS)?);

        let token_secret = match env::var("TOKEN_SECRET") {
            Ok(secret) if !secret.is_empty() => secret.into_bytes(),
            _ if cfg!(debug_assertions) => {
                warn!("TOKEN_SECRET not set; using an ephemeral secret (dev only)");
                rand::random::<[u8; 32]>().to_vec()
            }
            _ => return Err(ConfigError::MissingTokenSecret),
        };

        Ok(Self {
            port,
            token_secret,
            token_ttl,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.is_empty()),
            report_cache_ttl,
            report_cache_key: env::var("REPORT_CACHE_KEY")
                .ok()
                .filter(|key| !key.is_empty())
                .unwrap_or_else(|| DEFAULT_REPORT_KEY.into()),
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.is_empty() => raw
            .parse()
            .map_err(|err: T::Err| ConfigError::invalid(name, err.to_string())),
        _ => Ok(default),
    }
}
