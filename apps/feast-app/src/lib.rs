//! # Feast App Library
//!
//! Application layer for the Feast mobile app. The mobile shell owns one
//! [`Session`] and calls the functions in [`commands`] from its screens.
//!
//! ## Module Organization
//! ```text
//! feast_app/
//! ├── lib.rs          ◄─── You are here (startup & session)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── cart.rs     ◄─── Cart store ownership
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── menu.rs     ◄─── Menu browsing
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── order.rs    ◄─── Checkout and order history
//! │   ├── admin.rs    ◄─── Menu management, order status, analytics
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: info,feast=debug,sqlx=warn; override with RUST_LOG       │
//! │                                                                         │
//! │  2. Determine Database Path ──────────────────────────────────────────► │
//! │     • FEAST_DB_PATH if set                                              │
//! │     • Otherwise the platform data dir (…/feast/feast.db)                │
//! │                                                                         │
//! │  3. Connect to Database ──────────────────────────────────────────────► │
//! │     • SQLite with WAL mode                                              │
//! │     • Run pending migrations                                            │
//! │                                                                         │
//! │  4. Build the Session ────────────────────────────────────────────────► │
//! │     • DbState: wraps the Database handle                                │
//! │     • CartState: empty cart store                                       │
//! │     • ConfigState: defaults + FEAST_* overrides                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiResult;
use feast_db::{Database, DbConfig};
use state::{CartState, ConfigState, DbState};

/// Everything one running app needs: storage, the cart and the settings.
///
/// Commands borrow the pieces they use, e.g.
/// `commands::cart::add_to_cart(&session.db, &mut session.cart, request)`.
#[derive(Debug)]
pub struct Session {
    pub db: DbState,
    pub cart: CartState,
    pub config: ConfigState,
}

impl Session {
    pub fn new(db: Database, config: ConfigState) -> Self {
        Session {
            db: DbState::new(db),
            cart: CartState::new(),
            config,
        }
    }

    /// Opens the database described by `db_config` and starts with an
    /// empty cart.
    pub async fn open(db_config: DbConfig, config: ConfigState) -> ApiResult<Self> {
        let db = Database::new(db_config).await?;
        info!(store = %config.store_name, "Session opened");
        Ok(Session::new(db, config))
    }
}

/// Full startup: logging, database path, database, configuration.
pub async fn start() -> Result<Session, Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Feast");

    let db_path = database_path()?;
    info!(?db_path, "Database path determined");

    let session = Session::open(DbConfig::new(db_path), ConfigState::from_env()).await?;

    info!("Database connected and migrations applied");
    Ok(session)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=feast=trace` - Show trace (cart notifications) for feast crates
/// - Default: `info,feast=debug,sqlx=warn`
///
/// Calling this twice is harmless; the second call keeps the first subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,feast=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **Android/Linux**: `$XDG_DATA_HOME/feast/feast.db`
/// - **iOS/macOS**: `Application Support/co.feast.feast/feast.db`
///
/// ## Development Override
/// Set `FEAST_DB_PATH` to use a custom path.
pub fn database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Ok(path) = std::env::var("FEAST_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs =
        ProjectDirs::from("co", "feast", "feast").ok_or("Could not determine app data directory")?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("feast.db"))
}

// =============================================================================
// Test Support
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_starts_with_empty_cart() {
        let session = test_support::session().await;

        assert!(session.cart.snapshot().is_empty());
        assert!(session.db.inner().health_check().await);
        assert_eq!(session.config, ConfigState::default());
    }

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing();
        init_tracing();
    }
}
