use std::time::Duration;

use anyhow::Context;

const SESSION_MAX_AGE: Duration = Duration::from_secs(3600 * 24 * 15);

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub cookie_name: String,
    pub max_age: Duration,
}

impl SessionConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            cookie_name: "social_app".into(),
            max_age: SESSION_MAX_AGE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub primary_url: String,
    pub replica_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: Duration,
    pub acquire_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub assets_dir: String,
    pub db: DbConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let secret =
            std::env::var("SOCIAL_APP_SESSIONS_KEY").context("SOCIAL_APP_SESSIONS_KEY is not set")?;
        if secret.is_empty() {
            anyhow::bail!("SOCIAL_APP_SESSIONS_KEY must not be empty");
        }

        let primary_url =
            std::env::var("SOCIAL_APP_DATABASE_URL").context("SOCIAL_APP_DATABASE_URL is not set")?;
        let replica_url = std::env::var("SOCIAL_APP_DATABASE_URL_REPLICA")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| primary_url.clone());

        let db = DbConfig {
            primary_url,
            replica_url,
            max_connections: env_or("DB_MAX_CONNECTIONS", 150),
            min_connections: env_or("DB_MIN_CONNECTIONS", 10),
            max_lifetime: Duration::from_secs(env_or("DB_MAX_LIFETIME_SECS", 120)),
            acquire_timeout: Duration::from_secs(env_or("DB_ACQUIRE_TIMEOUT_SECS", 5)),
        };

        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("PORT", 8080),
            assets_dir: std::env::var("SOCIAL_APP_ASSETS_DIR")
                .unwrap_or_else(|_| "frontend/assets".into()),
            db,
            session: SessionConfig::new(secret),
        })
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
