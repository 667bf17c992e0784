//! # Menu Commands
//!
//! What the customer browses before anything goes into the cart.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Home screen                                                    │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │ 🔍 Search: "burger"        ──► get_menu(Some("burger")) │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │  Starters │ Mains │ Desserts │ ...  ──► get_menu_grouped()      │
//! │           │                                                     │
//! │           ▼ tap a card                                          │
//! │  Item screen ──► get_food_item(id) + get_customization_menu()   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Customers only ever see available items here; the admin screens list
//! the full menu through [`super::admin`].

use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::DbState;
use feast_core::menu::{self, MenuSection};
use feast_core::{CustomizationMenu, FoodItem};

/// Lists available items, newest first, optionally filtered by a
/// case-insensitive name search.
///
/// ## Arguments
/// * `query` - Search term; blank means no filter
pub async fn get_menu(db: &DbState, query: Option<String>) -> ApiResult<Vec<FoodItem>> {
    debug!(query = ?query, "get_menu command");

    let items = db.inner().food_items().list_available().await?;

    match query {
        Some(q) => Ok(menu::search(&items, &q)?),
        None => Ok(items),
    }
}

/// Available items grouped into the fixed category order. Empty
/// categories are left out.
pub async fn get_menu_grouped(db: &DbState) -> ApiResult<Vec<MenuSection>> {
    debug!("get_menu_grouped command");

    let items = db.inner().food_items().list_available().await?;
    Ok(menu::group_by_category(&items))
}

/// Gets a single item for the item screen.
///
/// Unavailable items are still returned so an open item screen can show
/// "sold out" instead of vanishing.
pub async fn get_food_item(db: &DbState, id: String) -> ApiResult<FoodItem> {
    debug!(id = %id, "get_food_item command");

    db.inner()
        .food_items()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("FoodItem", &id))
}

/// The sides, drinks, extras and removable ingredients offered on the item
/// screen.
pub fn get_customization_menu() -> CustomizationMenu {
    debug!("get_customization_menu command");
    CustomizationMenu::default()
}

// =============================================================================
// Unit Tests
// =============================================================================
