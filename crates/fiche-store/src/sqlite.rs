//! # SQLite Store
//!
//! Durable `RecordStore` backed by an SQLite connection pool.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  product_records                                                       │
//! │                                                                         │
//! │  seq │ record_key          │ payload (JSON)        │ found │ updated_at │
//! │  ────┼─────────────────────┼───────────────────────┼───────┼────────────│
//! │  1   │ ean:4006381333931   │ {"identifier":{...}}  │ 1     │ 2024-...   │
//! │  2   │ sku:ABC123          │ {"identifier":{...}}  │ 0     │ 2024-...   │
//! │                                                                         │
//! │  put  → INSERT ... ON CONFLICT(record_key) DO UPDATE (seq untouched)   │
//! │  list → ORDER BY seq  (= first insertion order)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! File databases run in WAL mode so HTTP handlers can read while a lookup
//! writes.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use fiche_core::{Identifier, ProductRecord};

use crate::error::{StoreError, StoreResult};
use crate::migrations;
use crate::store::RecordStore;

// =============================================================================
// Configuration
// =============================================================================

/// SQLite store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("./data/fiches.db").max_connections(5);
/// let store = SqliteStore::connect(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file (`:memory:` for tests).
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection acquire timeout.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection (`None` keeps it forever).
    /// Default: 10 minutes
    pub idle_timeout: Option<Duration>,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Configuration for a database file, created if missing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// An in-memory SQLite database lives as long as its connection, so the
    /// pool holds exactly one that never expires.
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: None,
            run_migrations: true,
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == ":memory:"
    }
}

// =============================================================================
// SQLite Store
// =============================================================================

/// Record store persisted in SQLite.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens the pool and, if configured, applies migrations.
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing record store database"
        );

        let connect_options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
        } else {
            let url = format!("sqlite://{}", config.database_path.display());
            SqliteConnectOptions::from_str(&url)
                .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .create_if_missing(true)
        };

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout);
        if config.is_in_memory() {
            pool_options = pool_options.max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        info!(max_connections = config.max_connections, "Record store pool created");

        let store = SqliteStore { pool };
        if config.run_migrations {
            migrations::run_migrations(&store.pool).await?;
        }
        Ok(store)
    }

    /// Closes the pool. Later operations fail with `ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing record store pool");
        self.pool.close().await;
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn put(&self, record: ProductRecord) -> StoreResult<()> {
        let key = record.identifier.storage_key();
        let payload = serde_json::to_string(&record)?;

        sqlx::query(
            r#"
            INSERT INTO product_records (record_key, payload, found, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(record_key) DO UPDATE SET
                payload = excluded.payload,
                found = excluded.found,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&key)
        .bind(&payload)
        .bind(record.found)
        .bind(record.looked_up_at)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, "Stored product record");
        Ok(())
    }

    async fn get(&self, id: &Identifier) -> StoreResult<Option<ProductRecord>> {
        let payload: Option<String> =
            sqlx::query_scalar("SELECT payload FROM product_records WHERE record_key = ?1")
                .bind(id.storage_key())
                .fetch_optional(&self.pool)
                .await?;

        payload
            .map(|p| serde_json::from_str(&p).map_err(StoreError::from))
            .transpose()
    }

    async fn list(&self) -> StoreResult<Vec<ProductRecord>> {
        let payloads: Vec<String> =
            sqlx::query_scalar("SELECT payload FROM product_records ORDER BY seq")
                .fetch_all(&self.pool)
                .await?;

        payloads
            .iter()
            .map(|p| serde_json::from_str(p).map_err(StoreError::from))
            .collect()
    }

    async fn count(&self) -> StoreResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product_records")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
