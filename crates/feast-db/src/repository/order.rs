//! # Order Repository
//!
//! Storage for submitted orders.
//!
//! ## Order Lifecycle in Storage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. PLACE                                                               │
//! │     └── insert(order) → row { status: pending, items_json: [...] }     │
//! │                                                                         │
//! │  2. KITCHEN / ADMIN                                                     │
//! │     └── update_status(id, preparing)   ┐                               │
//! │     └── update_status(id, ready)       ├─ one transaction each:        │
//! │     └── update_status(id, delivered)   ┘  read → check rule → write    │
//! │                                                                         │
//! │  3. CUSTOMER                                                            │
//! │     └── list_by_user(user_id) → newest first                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Order items are one JSON document per order. They are never queried
//! individually and never change after checkout.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use feast_core::{Order, OrderItem, OrderStatus, PaymentStatus};

const SELECT_COLUMNS: &str = r#"
    SELECT
        id,
        user_id,
        items_json,
        subtotal_cents,
        tax_cents,
        delivery_fee_cents,
        total_cents,
        status,
        delivery_address,
        customer_name,
        customer_email,
        customer_phone,
        payment_method,
        payment_status,
        created_at,
        updated_at
    FROM orders
"#;

/// Row shape of the `orders` table.
#[derive(Debug, FromRow)]
struct OrderRow {
    id: String,
    user_id: String,
    items_json: String,
    subtotal_cents: i64,
    tax_cents: i64,
    delivery_fee_cents: i64,
    total_cents: i64,
    status: OrderStatus,
    delivery_address: String,
    customer_name: Option<String>,
    customer_email: Option<String>,
    customer_phone: Option<String>,
    payment_method: Option<String>,
    payment_status: PaymentStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DbError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let items: Vec<OrderItem> = serde_json::from_str(&row.items_json)?;

        Ok(Order {
            id: row.id,
            user_id: row.user_id,
            items,
            subtotal_cents: row.subtotal_cents,
            tax_cents: row.tax_cents,
            delivery_fee_cents: row.delivery_fee_cents,
            total_cents: row.total_cents,
            status: row.status,
            delivery_address: row.delivery_address,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            customer_phone: row.customer_phone,
            payment_method: row.payment_method,
            payment_status: row.payment_status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_orders(rows: Vec<OrderRow>) -> DbResult<Vec<Order>> {
    rows.into_iter().map(Order::try_from).collect()
}

/// Repository for orders.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Stores a newly placed order.
    pub async fn insert(&self, order: &Order) -> DbResult<Order> {
        let items_json = serde_json::to_string(&order.items)?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, user_id, items_json,
                subtotal_cents, tax_cents, delivery_fee_cents, total_cents,
                status, delivery_address,
                customer_name, customer_email, customer_phone,
                payment_method, payment_status,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3,
                ?4, ?5, ?6, ?7,
                ?8, ?9,
                ?10, ?11, ?12,
                ?13, ?14,
                ?15, ?16
            )
            "#,
        )
        .bind(&order.id)
        .bind(&order.user_id)
        .bind(&items_json)
        .bind(order.subtotal_cents)
        .bind(order.tax_cents)
        .bind(order.delivery_fee_cents)
        .bind(order.total_cents)
        .bind(order.status)
        .bind(&order.delivery_address)
        .bind(&order.customer_name)
        .bind(&order.customer_email)
        .bind(&order.customer_phone)
        .bind(&order.payment_method)
        .bind(order.payment_status)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        info!(
            order_id = %order.id,
            user_id = %order.user_id,
            total_cents = order.total_cents,
            "Order stored"
        );

        Ok(order.clone())
    }

    /// Every order, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<Order>> {
        let sql = format!("{} ORDER BY created_at DESC", SELECT_COLUMNS);

        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed orders");
        into_orders(rows)
    }

    /// One customer's orders, newest first.
    pub async fn list_by_user(&self, user_id: &str) -> DbResult<Vec<Order>> {
        let sql = format!(
            "{} WHERE user_id = ?1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        );

        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        into_orders(rows)
    }

    /// Orders in one status, newest first.
    pub async fn list_by_status(&self, status: OrderStatus) -> DbResult<Vec<Order>> {
        let sql = format!(
            "{} WHERE status = ?1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        );

        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;

        into_orders(rows)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);

        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Order::try_from).transpose()
    }

    /// Moves an order to `status` if the status machine allows it.
    ///
    /// ## Errors
    /// * [`DbError::NotFound`] - no such order
    /// * [`DbError::Domain`] - the move is not allowed from the current status
    /// * [`DbError::TransactionFailed`] - the status changed underneath us
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> DbResult<Order> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("Order", id))?;

        let mut order = Order::try_from(row)?;
        let from = order.status;

        order.transition_to(status, Utc::now())?;

        // Guard on the status we read so a concurrent writer can't be overwritten
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = ?2, updated_at = ?3
            WHERE id = ?1 AND status = ?4
            "#,
        )
        .bind(&order.id)
        .bind(order.status)
        .bind(order.updated_at)
        .bind(from)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::TransactionFailed(format!(
                "order {} changed status concurrently",
                id
            )));
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(order_id = %id, from = %from, to = %status, "Order status updated");
        Ok(order)
    }

    /// Counts all orders (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::{Duration, TimeZone};
    use feast_core::CoreError;

    fn order(id: &str, user_id: &str, created_at: DateTime<Utc>) -> Order {
        Order {
            id: id.to_string(),
            user_id: user_id.to_string(),
            items: vec![OrderItem {
                food_item_id: "f-1".to_string(),
                name: "Beef Burger".to_string(),
                unit_price_cents: 5800,
                quantity: 2,
                line_total_cents: 11600,
                customizations: vec!["Extras: Cheese".to_string(), "No: Onion".to_string()],
            }],
            subtotal_cents: 11600,
            tax_cents: 1740,
            delivery_fee_cents: 1500,
            total_cents: 14840,
            status: OrderStatus::Pending,
            delivery_address: "12 Long Street, Cape Town".to_string(),
            customer_name: Some("Thandi".to_string()),
            customer_email: None,
            customer_phone: Some("+27 21 555 0100".to_string()),
            payment_method: Some("Visa •••• 1234".to_string()),
            payment_status: PaymentStatus::Pending,
            created_at,
            updated_at: created_at,
        }
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 1, 18, 30, 0).unwrap()
    }

    async fn repo() -> OrderRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().orders()
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let repo = repo().await;
        let placed = order("o-1", "u-1", base_time());

        repo.insert(&placed).await.unwrap();

        let fetched = repo.get_by_id("o-1").await.unwrap().unwrap();
        assert_eq!(fetched, placed);
        assert!(repo.get_by_id("o-404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_user_newest_first() {
        let repo = repo().await;
        repo.insert(&order("o-1", "u-1", base_time())).await.unwrap();
        repo.insert(&order("o-2", "u-2", base_time() + Duration::minutes(1)))
            .await
            .unwrap();
        repo.insert(&order("o-3", "u-1", base_time() + Duration::minutes(2)))
            .await
            .unwrap();

        let mine: Vec<String> = repo
            .list_by_user("u-1")
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(mine, vec!["o-3", "o-1"]);

        assert_eq!(repo.list_all().await.unwrap()[0].id, "o-3");
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_update_status_follows_lifecycle() {
        let repo = repo().await;
        repo.insert(&order("o-1", "u-1", base_time())).await.unwrap();

        for next in [OrderStatus::Preparing, OrderStatus::Ready, OrderStatus::Delivered] {
            let updated = repo.update_status("o-1", next).await.unwrap();
            assert_eq!(updated.status, next);
        }

        let stored = repo.get_by_id("o-1").await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Delivered);
        assert!(stored.updated_at > stored.created_at);
    }

    #[tokio::test]
    async fn test_illegal_status_move_is_rejected() {
        let repo = repo().await;
        repo.insert(&order("o-1", "u-1", base_time())).await.unwrap();

        let err = repo.update_status("o-1", OrderStatus::Delivered).await.unwrap_err();

        assert!(matches!(
            err,
            DbError::Domain(CoreError::InvalidStatusTransition { .. })
        ));
        let stored = repo.get_by_id("o-1").await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_update_status_unknown_order() {
        let repo = repo().await;
        let err = repo.update_status("o-404", OrderStatus::Preparing).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_by_status() {
        let repo = repo().await;
        repo.insert(&order("o-1", "u-1", base_time())).await.unwrap();
        repo.insert(&order("o-2", "u-1", base_time())).await.unwrap();
        repo.update_status("o-2", OrderStatus::Cancelled).await.unwrap();

        let cancelled = repo.list_by_status(OrderStatus::Cancelled).await.unwrap();
        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0].id, "o-2");
    }
}
