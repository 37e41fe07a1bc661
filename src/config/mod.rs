use std::env;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use thiserror::Error;

/// Process-wide configuration. Built once in `main` and handed to the router
/// state by reference; nothing reads the environment after startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Upper bound on a whole request, reads and writes included.
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: Duration,
    pub acquire_timeout: Duration,
    /// Startup connection attempts before giving up (fatal).
    pub connect_attempts: u32,
    pub connect_retry_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Decoded HS256 signing key, at least 32 bytes.
    pub secret_key: Vec<u8>,
    pub token_ttl_hours: i64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config: missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("config: invalid value for {0}")]
    InvalidVar(&'static str),

    #[error("config: invalid secret key (illegal base64)")]
    MalformedSecret,

    #[error("config: weak secret key (too short)")]
    WeakSecret,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var("APP_SECRET_KEY").map_err(|_| ConfigError::MissingVar("APP_SECRET_KEY"))?;
        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        Ok(Self {
            server: ServerConfig {
                port: env_parse("APP_PORT", 8080)?,
                request_timeout: Duration::from_secs(env_parse("REQUEST_TIMEOUT_SECS", 10)?),
            },
            database: DatabaseConfig {
                url,
                max_connections: env_parse("DATABASE_MAX_CONNECTIONS", 10)?,
                min_connections: env_parse("DATABASE_MIN_CONNECTIONS", 10)?,
                max_lifetime: Duration::from_secs(env_parse("DATABASE_MAX_LIFETIME_SECS", 300)?),
                acquire_timeout: Duration::from_secs(env_parse("DATABASE_ACQUIRE_TIMEOUT_SECS", 5)?),
                connect_attempts: 5,
                connect_retry_delay: Duration::from_secs(1),
            },
            security: SecurityConfig {
                secret_key: decode_secret(&secret)?,
                token_ttl_hours: env_parse("TOKEN_TTL_HOURS", 30 * 24)?,
            },
        })
    }
}

/// Decode and validate the signing key. The key is configured as standard
/// base64 and must decode to at least 32 bytes.
pub fn decode_secret(encoded: &str) -> Result<Vec<u8>, ConfigError> {
    let key = BASE64.decode(encoded).map_err(|_| ConfigError::MalformedSecret)?;

    if key.len() < 32 {
        return Err(ConfigError::WeakSecret);
    }

    Ok(key)
}

fn env_parse<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(v) => v.parse().map_err(|_| ConfigError::InvalidVar(name)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

    #[test]
    fn accepts_a_32_byte_secret() {
        let encoded = BASE64.encode([7u8; 32]);
        let key = decode_secret(&encoded).unwrap();
        assert_eq!(key.len(), 32);
    }

    #[test]
    fn rejects_a_short_secret() {
        let encoded = BASE64.encode([7u8; 31]);
        assert!(matches!(decode_secret(&encoded), Err(ConfigError::WeakSecret)));
    }

    #[test]
    fn rejects_illegal_base64() {
        assert!(matches!(decode_secret("not base64!!"), Err(ConfigError::MalformedSecret)));
    }
}
