//! SQLite persistence for postings
//!
//! - One [`SqlitePool`] shared by every request, WAL mode so readers never
//!   block the scraper's writes
//! - Schema is idempotent and applied on every open
//! - Filter predicates are rendered once in [`query`] and shared by the
//!   row query and the count query

pub mod postings;
pub mod query;

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};

pub use postings::{PostingRepo, Stats};

/// Maximum pooled connections for a file-backed store
const MAX_CONNECTIONS: u32 = 5;

const SCHEMA: &str = include_str!("schema.sql");

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("failed to prepare database directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("posting {id} has an unreadable {column}: {value}")]
    InvalidRow {
        id: i64,
        column: &'static str,
        value: String,
    },
}

/// Handle to the postings database. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
    path: Option<PathBuf>,
}

impl Store {
    /// Open (creating if needed) the database file at `path` and apply the
    /// schema. Missing parent directories are created.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| DbError::Directory {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        let store = Self {
            pool,
            path: Some(path.to_path_buf()),
        };
        store.migrate().await?;

        tracing::debug!(path = %path.display(), "opened postings database");
        Ok(store)
    }

    /// Private in-memory database, used by tests and throwaway runs.
    ///
    /// Each SQLite memory connection is its own database, so the pool holds
    /// exactly one connection and never recycles it.
    pub async fn open_in_memory() -> Result<Self, DbError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool, path: None };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), DbError> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Backing file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn postings(&self) -> PostingRepo<'_> {
        PostingRepo::new(&self.pool)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
