//! Database handle with an explicit open/close lifecycle

use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;

/// Owns the connection pool. Constructed once by the module and passed to
/// each repository; nothing holds it in a global.
#[derive(Clone)]
pub struct DbHandle {
    conn: Arc<DatabaseConnection>,
}

impl DbHandle {
    /// Open a pool for `url` (postgres://, sqlite://)
    pub async fn open(url: &str) -> Result<Self> {
        let mut options = ConnectOptions::new(url.to_string());
        options
            .max_connections(16)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .with_context(|| format!("failed to connect to {}", redact(url)))?;
        tracing::info!(url = %redact(url), "Database connected");

        Ok(Self {
            conn: Arc::new(conn),
        })
    }

    pub fn conn(&self) -> Arc<DatabaseConnection> {
        self.conn.clone()
    }

    /// Close the pool. Clones of the handle still in use keep their
    /// connection until dropped.
    pub async fn close(self) -> Result<()> {
        match Arc::try_unwrap(self.conn) {
            Ok(conn) => {
                conn.close().await.context("failed to close database")?;
                tracing::info!("Database closed");
            }
            Err(_) => tracing::debug!("Database handle still shared, deferring close to drop"),
        }
        Ok(())
    }
}

/// Strip credentials from a connection URL for logging
pub fn redact(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(mut parsed) if parsed.password().is_some() => {
            let _ = parsed.set_password(Some("***"));
            parsed.to_string()
        }
        Ok(parsed) => parsed.to_string(),
        Err(_) => "<invalid url>".to_string(),
    }
}
