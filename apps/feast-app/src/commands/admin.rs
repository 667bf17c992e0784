//! # Admin Commands
//!
//! Menu management, the kitchen's order board and the dashboard.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Admin tabs                                                             │
//! │                                                                         │
//! │  Menu ──────► list_menu_items / create / update / delete                │
//! │                                                                         │
//! │  Orders ────► list_orders(status filter)                                │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │               update_order_status                                       │
//! │               pending ──► preparing ──► ready ──► delivered             │
//! │                  └────────────┴──► cancelled                            │
//! │                                                                         │
//! │  Dashboard ─► get_analytics(total_users)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Access control belongs to the auth provider in front of the app; these
//! functions assume the caller is already an admin.

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::state::DbState;
use feast_core::analytics::AnalyticsReport;
use feast_core::menu::{FoodItemPatch, NewFoodItem};
use feast_core::{FoodItem, Order, OrderStatus};

// =============================================================================
// Menu
// =============================================================================

/// The whole menu, including unavailable items, newest first.
pub async fn list_menu_items(db: &DbState) -> ApiResult<Vec<FoodItem>> {
    debug!("list_menu_items command");
    Ok(db.inner().food_items().list_all().await?)
}

/// Adds a menu item.
pub async fn create_food_item(db: &DbState, input: NewFoodItem) -> ApiResult<FoodItem> {
    debug!(name = %input.name, "create_food_item command");

    let item = input.into_food_item(Utc::now())?;
    let item = db.inner().food_items().insert(&item).await?;

    info!(id = %item.id, name = %item.name, "Food item created");
    Ok(item)
}

/// Applies a partial update. An empty patch returns the item unchanged.
pub async fn update_food_item(
    db: &DbState,
    id: String,
    patch: FoodItemPatch,
) -> ApiResult<FoodItem> {
    debug!(id = %id, "update_food_item command");

    let repo = db.inner().food_items();
    let mut item = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("FoodItem", &id))?;

    if patch.is_empty() {
        return Ok(item);
    }

    patch.apply_to(&mut item, Utc::now())?;
    repo.update(&item).await?;

    info!(id = %item.id, "Food item updated");
    Ok(item)
}

/// Removes a menu item. Past orders keep their own copy of it.
pub async fn delete_food_item(db: &DbState, id: String) -> ApiResult<()> {
    debug!(id = %id, "delete_food_item command");

    db.inner().food_items().delete(&id).await?;

    info!(id = %id, "Food item deleted");
    Ok(())
}

// =============================================================================
// Orders
// =============================================================================

/// All orders, newest first, optionally only those in one status.
pub async fn list_orders(db: &DbState, status: Option<OrderStatus>) -> ApiResult<Vec<Order>> {
    debug!(status = ?status, "list_orders command");

    let repo = db.inner().orders();
    let orders = match status {
        Some(status) => repo.list_by_status(status).await?,
        None => repo.list_all().await?,
    };

    Ok(orders)
}

/// Moves an order along the status machine.
///
/// ## Errors
/// * `NOT_FOUND` - no such order
/// * `BUSINESS_LOGIC` - the move is not allowed from the current status
pub async fn update_order_status(
    db: &DbState,
    id: String,
    status: OrderStatus,
) -> ApiResult<Order> {
    debug!(id = %id, status = %status, "update_order_status command");

    Ok(db.inner().orders().update_status(&id, status).await?)
}

// =============================================================================
// Dashboard
// =============================================================================

/// Dashboard figures over every stored order, relative to today (UTC).
///
/// `total_users` comes from the user directory, which this app does not own.
pub async fn get_analytics(db: &DbState, total_users: u32) -> ApiResult<AnalyticsReport> {
    debug!(total_users, "get_analytics command");

    let orders = db.inner().orders().list_all().await?;
    Ok(AnalyticsReport::build(
        &orders,
        Utc::now().date_naive(),
        total_users,
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, AddToCartRequest};
    use crate::commands::order::place_order;
    use crate::error::ErrorCode;
    use crate::test_support::session;
    use crate::Session;
    use feast_core::{Category, OrderDraft};

    fn new_item(name: &str, price_cents: i64) -> NewFoodItem {
        NewFoodItem {
            name: name.to_string(),
            description: "House special".to_string(),
            price_cents,
            category: Category::Mains,
            image_url: None,
            available: true,
        }
    }

    async fn order_one(session: &mut Session, item: &FoodItem, quantity: i64) -> Order {
        let request = AddToCartRequest {
            food_item_id: item.id.clone(),
            quantity: Some(quantity),
            customization: None,
        };
        add_to_cart(&session.db, &mut session.cart, request)
            .await
            .unwrap();

        place_order(
            &session.db,
            &mut session.cart,
            &session.config,
            OrderDraft::new("user-1", "1 Main Road"),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list_menu_items() {
        let session = session().await;

        let created = create_food_item(&session.db, new_item("Bunny Chow", 11000))
            .await
            .unwrap();

        let all = list_menu_items(&session.db).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, created.id);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let session = session().await;

        let err = create_food_item(&session.db, new_item("", 1000))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = create_food_item(&session.db, new_item("Free Lunch", -1))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_update_food_item() {
        let session = session().await;
        let created = create_food_item(&session.db, new_item("Bunny Chow", 11000))
            .await
            .unwrap();

        let patch = FoodItemPatch {
            price_cents: Some(12000),
            available: Some(false),
            ..FoodItemPatch::default()
        };
        let updated = update_food_item(&session.db, created.id.clone(), patch)
            .await
            .unwrap();

        assert_eq!(updated.price_cents, 12000);
        assert!(!updated.available);
        assert_eq!(updated.name, "Bunny Chow");

        let err = update_food_item(&session.db, "ghost".into(), FoodItemPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_delete_food_item() {
        let session = session().await;
        let created = create_food_item(&session.db, new_item("Bunny Chow", 11000))
            .await
            .unwrap();

        delete_food_item(&session.db, created.id.clone()).await.unwrap();

        let err = delete_food_item(&session.db, created.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_order_status_flow_and_filter() {
        let mut session = session().await;
        let item = create_food_item(&session.db, new_item("Bunny Chow", 11000))
            .await
            .unwrap();
        let first = order_one(&mut session, &item, 1).await;
        order_one(&mut session, &item, 2).await;

        let preparing = update_order_status(&session.db, first.id.clone(), OrderStatus::Preparing)
            .await
            .unwrap();
        assert_eq!(preparing.status, OrderStatus::Preparing);

        let pending = list_orders(&session.db, Some(OrderStatus::Pending)).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(list_orders(&session.db, None).await.unwrap().len(), 2);

        let err = update_order_status(&session.db, first.id, OrderStatus::Pending)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        let err = update_order_status(&session.db, "ghost".into(), OrderStatus::Ready)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_get_analytics() {
        let mut session = session().await;
        let item = create_food_item(&session.db, new_item("Bunny Chow", 10000))
            .await
            .unwrap();
        let order = order_one(&mut session, &item, 3).await;

        let report = get_analytics(&session.db, 12).await.unwrap();

        assert_eq!(report.daily_revenue.len(), 7);
        assert_eq!(report.daily_revenue.last().unwrap().revenue, order.total());
        assert_eq!(report.top_selling_items[0].name, "Bunny Chow");
        assert_eq!(report.top_selling_items[0].quantity, 3);
        assert_eq!(report.monthly_stats.total_orders, 1);
        assert_eq!(report.monthly_stats.total_users, 12);
        assert_eq!(report.monthly_stats.active_users, 1);
    }
}
