//! # Schema Migrations
//!
//! The SQL files under `crates/feast-db/migrations/` are compiled into the
//! binary, so the app can bring an old database on the phone up to date
//! without shipping loose files.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      On Every Open                                      │
//! │                                                                         │
//! │  Database::new(config)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  _sqlx_migrations (created on first run) lists what is applied         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  embedded: 001_initial_schema.sql, ...                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply the missing ones in filename order, one transaction each        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Schema changes go in a new `NNN_description.sql` file. Applied files are
//! checksummed, so editing one breaks every existing install.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Applies whatever the database has not seen yet. Safe to call on every
/// start.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!(embedded = MIGRATOR.migrations.len(), "Applying schema migrations");

    MIGRATOR.run(pool).await?;

    info!("Schema up to date");
    Ok(())
}

/// `(embedded, applied)` migration counts, for diagnostics. A database that
/// was never migrated reports zero applied.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((MIGRATOR.migrations.len(), applied.max(0) as usize))
}
