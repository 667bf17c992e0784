//! # Database State
//!
//! Wraps the `Database` handle for use in commands.
//!
//! The `Database` from `feast-db` holds a `SqlitePool`, which is shared
//! internally, so commands only ever need `&DbState`.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn get_menu(db: &DbState, query: Option<String>) -> ApiResult<Vec<FoodItem>> {
//!     let items = db.inner().food_items().list_available().await?;
//!     Ok(items)
//! }
//! ```

use feast_db::Database;

#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    pub fn inner(&self) -> &Database {
        &self.db
    }
}
