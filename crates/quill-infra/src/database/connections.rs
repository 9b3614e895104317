use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the main database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    /// The connection URL with its password masked, safe for logs.
    pub fn redacted_url(&self) -> String {
        let Some(scheme_end) = self.url.find("://").map(|i| i + 3) else {
            return self.url.clone();
        };
        match self.url.rfind('@') {
            Some(at) if at > scheme_end => {
                let user = self.url[scheme_end..at].split(':').next().unwrap_or_default();
                format!("{}{}:***{}", &self.url[..scheme_end], user, &self.url[at..])
            }
            _ => self.url.clone(),
        }
    }
}

/// Pooled connection to the main database.
///
/// The pool is shared by every repository; checkout, return and isolation
/// are left to SeaORM and sqlx.
pub struct DatabaseConnections {
    pub main: DbConn,
}

impl DatabaseConnections {
    /// Open the pool and verify the server answers.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!(url = %config.redacted_url(), "Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(config.connect_timeout)
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let main = Database::connect(opts).await?;
        main.ping().await?;

        tracing::info!(
            "Main database connected (pool: {})",
            config.max_connections
        );

        Ok(Self { main })
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        self.main.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn test_redacted_url_masks_password() {
        let cfg = config("postgres://quill:s3cret@db:5432/quill");
        assert_eq!(cfg.redacted_url(), "postgres://quill:***@db:5432/quill");
    }

    #[test]
    fn test_redacted_url_without_credentials() {
        let cfg = config("postgres://localhost/quill");
        assert_eq!(cfg.redacted_url(), "postgres://localhost/quill");
    }
}
