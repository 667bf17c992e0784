//! # feast-db: Storage Layer for Feast
//!
//! Menu and order storage on SQLite, via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Feast Data Flow                                  │
//! │                                                                         │
//! │  App command (get_menu, place_order, update_order_status)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     feast-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │   │   │
//! │  │   │ SqlitePool    │◄───│ FoodItemRepo   │   │ 001_initial  │   │   │
//! │  │   │               │    │ OrderRepo      │   │              │   │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file in the platform data dir (feast.db)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use feast_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("feast.db")).await?;
//! let menu = db.food_items().list_available().await?;
//! let mine = db.orders().list_by_user("user-1").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::food_item::FoodItemRepository;
pub use repository::order::OrderRepository;
