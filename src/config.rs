use std::time::Duration;
use thiserror::Error;

/// Port the API listens on, on all interfaces.
pub const LISTEN_PORT: u16 = 5000;

/// Upper bound on a single request, store round-trips included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const DB_MAX_CONNECTIONS: u32 = 5;
pub const DB_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

const LEGACY_SCHEME: &str = "postgres://";
const SCHEME: &str = "postgresql://";

const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_HOST: &str = "db";
const DEFAULT_DB_NAME: &str = "valorant_stats";
const DEFAULT_DB_SSLMODE: &str = "disable";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// Only raised when `DATABASE_URL` is absent and the discrete
    /// `DB_*` variables are used instead.
    #[error("DB_PASSWORD environment variable not set (required for local dev).")]
    MissingPassword,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
}

impl Config {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through `lookup`, which returns the value of
    /// an environment variable if it is set.
    ///
    /// A non-empty `DATABASE_URL` wins. Otherwise the URL is composed from
    /// `DB_USER`, `DB_PASSWORD`, `DB_HOST`, `DB_NAME` and `DB_SSLMODE`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(url) = var("DATABASE_URL") {
            return Ok(Self {
                database_url: normalize_scheme(&url),
            });
        }

        let user = var("DB_USER").unwrap_or_else(|| DEFAULT_DB_USER.to_string());
        let password = var("DB_PASSWORD").ok_or(ConfigError::MissingPassword)?;
        let host = var("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string());
        let name = var("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
        let sslmode = var("DB_SSLMODE").unwrap_or_else(|| DEFAULT_DB_SSLMODE.to_string());

        Ok(Self {
            database_url: format!(
                "{}{}:{}@{}/{}?sslmode={}",
                SCHEME, user, password, host, name, sslmode
            ),
        })
    }
}

// Hosting providers still hand out `postgres://` URLs.
fn normalize_scheme(url: &str) -> String {
    match url.strip_prefix(LEGACY_SCHEME) {
        Some(rest) => format!("{}{}", SCHEME, rest),
        None => url.to_string(),
    }
}
