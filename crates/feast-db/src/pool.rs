//! # Connection Pool
//!
//! Opens the SQLite database that lives on the phone and hands out
//! repository handles.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Opening the Store                                  │
//! │                                                                         │
//! │  feast-app startup                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(data_dir/feast.db)     DbConfig::in_memory() (tests)     │
//! │       │                                        │                        │
//! │       └──────────────────┬─────────────────────┘                        │
//! │                          ▼                                              │
//! │  Database::new(config) ── WAL, foreign keys, busy timeout               │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  embedded migrations (unless disabled)                                  │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  db.food_items() / db.orders()  (each holds a clone of the pool)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A phone runs one writer at a time, so the pool is small. WAL keeps menu
//! reads from waiting on an order insert.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::food_item::FoodItemRepository;
use crate::repository::order::OrderRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Where the data lives.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Storage {
    File(PathBuf),
    /// Private to one connection; gone when the pool closes.
    Memory,
}

/// Pool settings, built up with chained setters.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new(data_dir.join("feast.db"))
///     .max_connections(2)
///     .busy_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    storage: Storage,

    /// Default: 4
    max_connections: u32,

    /// Default: 1
    min_connections: u32,

    /// How long a caller waits for a free connection. Default: 10 seconds
    acquire_timeout: Duration,

    /// How long SQLite retries a locked database. Default: 5 seconds
    busy_timeout: Duration,

    /// Default: 5 minutes; `None` keeps idle connections open
    idle_timeout: Option<Duration>,

    /// Default: true
    run_migrations: bool,
}

impl DbConfig {
    /// Settings for the database file at `path`, created on first open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            storage: Storage::File(path.into()),
            max_connections: 4,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(10),
            busy_timeout: Duration::from_secs(5),
            idle_timeout: Some(Duration::from_secs(300)),
            run_migrations: true,
        }
    }

    /// A throwaway database for tests. Every call is isolated from the
    /// others.
    pub fn in_memory() -> Self {
        // One connection: a second one would see a different empty database
        DbConfig {
            storage: Storage::Memory,
            max_connections: 1,
            min_connections: 1,
            idle_timeout: None,
            ..DbConfig::new(PathBuf::new())
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Turn off to open a database whose schema is managed elsewhere.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// The database file, or `None` for an in-memory database.
    pub fn path(&self) -> Option<&Path> {
        match &self.storage {
            Storage::File(path) => Some(path),
            Storage::Memory => None,
        }
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = match &self.storage {
            Storage::Memory => SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?,
            Storage::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal),
        };

        Ok(options.foreign_keys(true).busy_timeout(self.busy_timeout))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the open database.
///
/// Cloning is cheap: the pool is reference counted.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and applies pending migrations.
    ///
    /// ## Errors
    /// [`DbError::ConnectionFailed`](crate::DbError::ConnectionFailed) when
    /// the file cannot be opened,
    /// [`DbError::MigrationFailed`](crate::DbError::MigrationFailed) when the
    /// schema cannot be brought up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        match config.path() {
            Some(path) => info!(path = %path.display(), "Opening database"),
            None => info!("Opening in-memory database"),
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = config.max_connections, "Pool ready");

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations. [`Database::new`] already does this
    /// unless the config turned it off.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Raw pool access for queries not covered by repositories.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Menu storage.
    ///
    /// ```rust,ignore
    /// let menu = db.food_items().list_available().await?;
    /// ```
    pub fn food_items(&self) -> FoodItemRepository {
        FoodItemRepository::new(self.pool.clone())
    }

    /// Order storage.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Closes every connection. Repository calls made afterwards fail with
    /// [`DbError::ConnectionFailed`](crate::DbError::ConnectionFailed).
    pub async fn close(&self) {
        info!("Closing database");
        self.pool.close().await;
    }

    /// True when a trivial query succeeds.
    pub async fn health_check(&self) -> bool {
        if let Err(e) = sqlx::query("SELECT 1").execute(&self.pool).await {
            warn!(error = %e, "Database health check failed");
            return false;
        }
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
