//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use quill_infra::database::DatabaseConfig;

/// Where the repositories keep their rows.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Postgres(DatabaseConfig),
    /// `DATABASE_URL=memory` - volatile, for local runs without PostgreSQL.
    Memory,
}

/// The discrete `DATABASE_*` settings, kept for startup diagnostics.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub host: Option<String>,
    pub port: Option<String>,
    pub name: Option<String>,
    pub user: Option<String>,
}

impl DatabaseSettings {
    fn from_env() -> Self {
        Self {
            host: env::var("DATABASE_HOST").ok(),
            port: env::var("DATABASE_PORT").ok(),
            name: env::var("DATABASE_NAME").ok(),
            user: env::var("DATABASE_USER").ok(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageConfig,
    pub database_settings: DatabaseSettings,
    /// Upper bound on establishing the database connection at startup.
    pub connect_timeout: Duration,
    pub run_migrations: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let connect_timeout = Duration::from_secs(parse_var("DB_CONNECT_TIMEOUT_SECS", 10));

        let storage = match env::var("DATABASE_URL").ok() {
            Some(url) if url.eq_ignore_ascii_case("memory") => StorageConfig::Memory,
            url => StorageConfig::Postgres(DatabaseConfig {
                url: url.unwrap_or_else(Self::database_url_from_parts),
                max_connections: parse_var("DB_MAX_CONNECTIONS", 10),
                min_connections: parse_var("DB_MIN_CONNECTIONS", 1),
                connect_timeout,
            }),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 3000),
            storage,
            database_settings: DatabaseSettings::from_env(),
            connect_timeout,
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Build a PostgreSQL URL from DATABASE_HOST/PORT/NAME/USER/PASSWORD.
    fn database_url_from_parts() -> String {
        let var = |key: &str, default: &str| env::var(key).unwrap_or_else(|_| default.to_string());

        format!(
            "postgres://{}:{}@{}:{}/{}",
            var("DATABASE_USER", "postgres"),
            var("DATABASE_PASSWORD", "postgres"),
            var("DATABASE_HOST", "localhost"),
            var("DATABASE_PORT", "5432"),
            var("DATABASE_NAME", "quill"),
        )
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_default_when_unset() {
        assert_eq!(parse_var("QUILL_TEST_UNSET_PORT", 3000u16), 3000);
    }
}
