//! Server configuration from environment variables

use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;

const DEFAULT_FILTER: &str = "api=info,auth=info,tower_http=info";
const DEFAULT_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

pub struct ApiConfig {
    pub http_port: u16,
    pub log_level: Option<String>,
    pub database_url: String,
    pub database_max_connections: u32,
    pub run_migrations: bool,
    pub redis_url: String,
    pub frontend_origins: Vec<String>,
    pub request_timeout: Duration,
    pub auth: AuthConfig,
    /// No `JWT_SECRET` was given and a random one is in use
    pub ephemeral_secret: bool,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let http_port = parse_or(var("HTTP_PORT"), "HTTP_PORT", 8080)?;
        let database_max_connections =
            parse_or(var("DATABASE_MAX_CONNECTIONS"), "DATABASE_MAX_CONNECTIONS", 5)?;
        let run_migrations = parse_bool(var("RUN_MIGRATIONS"), "RUN_MIGRATIONS")?;
        let timeout_secs: u64 = parse_or(var("REQUEST_TIMEOUT_SECS"), "REQUEST_TIMEOUT_SECS", 10)?;

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let redis_url = var("REDIS_URL").context("REDIS_URL must be set")?;

        let (auth, ephemeral_secret) = match var("JWT_SECRET") {
            Some(secret) => (AuthConfig::with_secret(secret.into_bytes()), false),
            None if cfg!(debug_assertions) => (AuthConfig::development(), true),
            None => bail!("JWT_SECRET must be set in production"),
        };

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ORIGINS.to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Ok(Self {
            http_port,
            log_level: var("LOG_LEVEL"),
            database_url,
            database_max_connections,
            run_migrations,
            redis_url,
            frontend_origins,
            request_timeout: Duration::from_secs(timeout_secs),
            auth,
            ephemeral_secret,
        })
    }

    /// `RUST_LOG` wins, then `LOG_LEVEL`, then the built-in default
    pub fn log_filter(&self, rust_log: Option<String>) -> String {
        rust_log
            .or_else(|| self.log_level.clone())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string())
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", key, v)),
        None => Ok(default),
    }
}

fn parse_bool(raw: Option<String>, key: &str) -> anyhow::Result<bool> {
    match raw.as_deref().map(str::trim) {
        None => Ok(false),
        Some(v) if ["1", "true", "yes", "on"].iter().any(|t| v.eq_ignore_ascii_case(t)) => Ok(true),
        Some(v) if ["0", "false", "no", "off"].iter().any(|t| v.eq_ignore_ascii_case(t)) => Ok(false),
        Some(v) => bail!("{} has an invalid value: {}", key, v),
    }
}
