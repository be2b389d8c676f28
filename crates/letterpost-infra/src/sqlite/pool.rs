//! SQLite connection pools.
//!
//! Sessions are written on every submission but read far more often
//! (step lookups, stats), so the database is opened in WAL mode with one
//! writer connection and a small pool of read-only connections.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

const READER_CONNECTIONS: u32 = 4;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Split read/write pool over one SQLite database.
#[derive(Clone)]
pub struct DatabasePool {
    /// Read-only connections for SELECTs.
    pub reader: SqlitePool,
    /// The single connection every write goes through.
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open (creating if needed) the database at `url` and apply migrations.
    pub async fn new(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT)
            .create_if_missing(true);

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await?;

        // The reader pool is read-only, so the schema must exist first.
        sqlx::migrate!("../../migrations").run(&writer).await?;
        tracing::debug!(url, "database migrated");

        let reader = SqlitePoolOptions::new()
            .max_connections(READER_CONNECTIONS)
            .connect_with(options.read_only(true))
            .await?;

        Ok(Self { reader, writer })
    }

    /// Open the database file at `path`.
    pub async fn open(path: &Path) -> Result<Self, sqlx::Error> {
        Self::new(&format!("sqlite://{}?mode=rwc", path.display())).await
    }
}
