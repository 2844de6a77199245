use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Opens one Postgres connection per call. There is no pool: every caller
/// owns the connection it receives and is expected to close it.
#[derive(Debug, Clone)]
pub struct DatabaseManager {
    options: PgConnectOptions,
    url: String,
}

impl DatabaseManager {
    pub fn new(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let mut options =
            PgConnectOptions::from_str(&config.url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if !config.enable_query_logging {
            options = options.disable_statement_logging();
        }

        Ok(Self {
            options,
            url: config.url.clone(),
        })
    }

    /// Open a fresh connection
    pub async fn connect(&self) -> Result<PgConnection, DatabaseError> {
        let conn = PgConnection::connect_with(&self.options)
            .await
            .map_err(DatabaseError::Connection)?;
        debug!("Opened database connection to {}", self.redacted_url());
        Ok(conn)
    }

    /// Close a connection, logging instead of failing so the caller keeps
    /// the result of the work it already did.
    pub async fn release(&self, conn: PgConnection) {
        if let Err(e) = conn.close().await {
            warn!("Failed to close database connection cleanly: {}", e);
        }
    }

    /// Opens a connection and runs `SELECT 1`
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query("SELECT 1").execute(&mut conn).await;
        self.release(conn).await;
        result?;
        Ok(())
    }

    /// Database URL with the password stripped, for logs
    pub fn redacted_url(&self) -> String {
        match url::Url::parse(&self.url) {
            Ok(mut url) => {
                if url.password().is_some() {
                    let _ = url.set_password(Some("***"));
                }
                url.into()
            }
            Err(_) => "<unparseable database url>".to_string(),
        }
    }
}
