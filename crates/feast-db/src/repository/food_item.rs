//! # Food Item Repository
//!
//! Menu storage. Listing is newest first, the way the admin menu screen
//! shows it; grouping and search happen in `feast_core::menu`.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use feast_core::FoodItem;

const SELECT_COLUMNS: &str = r#"
    SELECT
        id,
        name,
        description,
        price_cents,
        category,
        image_url,
        available,
        created_at,
        updated_at
    FROM food_items
"#;

/// Repository for menu items.
///
/// ## Usage
/// ```rust,ignore
/// let repo = FoodItemRepository::new(pool);
/// let menu = repo.list_available().await?;
/// let burger = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct FoodItemRepository {
    pool: SqlitePool,
}

impl FoodItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        FoodItemRepository { pool }
    }

    /// All items, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<FoodItem>> {
        let sql = format!("{} ORDER BY created_at DESC, name", SELECT_COLUMNS);

        let items = sqlx::query_as::<_, FoodItem>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = items.len(), "Listed food items");
        Ok(items)
    }

    /// Items the kitchen currently offers, newest first.
    pub async fn list_available(&self) -> DbResult<Vec<FoodItem>> {
        let sql = format!(
            "{} WHERE available = 1 ORDER BY created_at DESC, name",
            SELECT_COLUMNS
        );

        let items = sqlx::query_as::<_, FoodItem>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Gets an item by id.
    ///
    /// ## Returns
    /// * `Ok(Some(FoodItem))` - Item found
    /// * `Ok(None)` - No such item
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<FoodItem>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);

        let item = sqlx::query_as::<_, FoodItem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Inserts a new item. The id and timestamps come from the caller.
    ///
    /// ## Errors
    /// * [`DbError::UniqueViolation`] - id already exists
    /// * [`DbError::ConstraintViolation`] - negative price
    pub async fn insert(&self, item: &FoodItem) -> DbResult<FoodItem> {
        debug!(id = %item.id, name = %item.name, "Inserting food item");

        sqlx::query(
            r#"
            INSERT INTO food_items (
                id, name, description, price_cents, category,
                image_url, available, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price_cents)
        .bind(item.category)
        .bind(&item.image_url)
        .bind(item.available)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item.clone())
    }

    /// Writes every field of `item` except `created_at`.
    ///
    /// ## Errors
    /// * [`DbError::NotFound`] - no item with this id
    pub async fn update(&self, item: &FoodItem) -> DbResult<()> {
        debug!(id = %item.id, "Updating food item");

        let result = sqlx::query(
            r#"
            UPDATE food_items SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                category = ?5,
                image_url = ?6,
                available = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price_cents)
        .bind(item.category)
        .bind(&item.image_url)
        .bind(item.available)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("FoodItem", &item.id));
        }

        Ok(())
    }

    /// Marks an item as (un)available without touching anything else.
    pub async fn set_availability(&self, id: &str, available: bool) -> DbResult<()> {
        debug!(id = %id, available, "Setting food item availability");

        let result = sqlx::query(
            r#"
            UPDATE food_items
            SET available = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(available)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("FoodItem", id));
        }

        Ok(())
    }

    /// Deletes an item. Orders keep their own copy of name and price, so
    /// history is unaffected.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting food item");

        let result = sqlx::query("DELETE FROM food_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("FoodItem", id));
        }

        Ok(())
    }

    /// Counts all items (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM food_items")
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
    use chrono::{DateTime, Duration, TimeZone};
    use feast_core::Category;

    fn item(id: &str, name: &str, created_at: DateTime<Utc>) -> FoodItem {
        FoodItem {
            id: id.to_string(),
            name: name.to_string(),
            description: "Test item".to_string(),
            price_cents: 5000,
            category: Category::Burgers,
            image_url: None,
            available: true,
            created_at,
            updated_at: created_at,
        }
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap()
    }

    async fn repo() -> FoodItemRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().food_items()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = repo().await;
        let mut burger = item("f-1", "Beef Burger", base_time());
        burger.image_url = Some("menu/beef.jpg".to_string());

        repo.insert(&burger).await.unwrap();
        let fetched = repo.get_by_id("f-1").await.unwrap().unwrap();

        assert_eq!(fetched, burger);
        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let repo = repo().await;
        repo.insert(&item("f-1", "Old", base_time())).await.unwrap();
        repo.insert(&item("f-2", "New", base_time() + Duration::hours(1)))
            .await
            .unwrap();

        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();

        assert_eq!(names, vec!["New", "Old"]);
    }

    #[tokio::test]
    async fn test_list_available_and_set_availability() {
        let repo = repo().await;
        repo.insert(&item("f-1", "Wings", base_time())).await.unwrap();
        repo.insert(&item("f-2", "Ribs", base_time())).await.unwrap();

        repo.set_availability("f-2", false).await.unwrap();

        let available = repo.list_available().await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, "f-1");
        assert!(matches!(
            repo.set_availability("nope", true).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update() {
        let repo = repo().await;
        let mut wrap = item("f-1", "Wrap", base_time());
        repo.insert(&wrap).await.unwrap();

        wrap.price_cents = 4200;
        wrap.category = Category::Mains;
        wrap.updated_at = base_time() + Duration::minutes(5);
        repo.update(&wrap).await.unwrap();

        let fetched = repo.get_by_id("f-1").await.unwrap().unwrap();
        assert_eq!(fetched.price_cents, 4200);
        assert_eq!(fetched.category, Category::Mains);
        assert_eq!(fetched.created_at, base_time());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = repo().await;
        let err = repo.update(&item("ghost", "Ghost", base_time())).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        repo.insert(&item("f-1", "Salad", base_time())).await.unwrap();

        repo.delete("f-1").await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(matches!(repo.delete("f-1").await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_id_is_unique_violation() {
        let repo = repo().await;
        repo.insert(&item("f-1", "Salad", base_time())).await.unwrap();

        let err = repo.insert(&item("f-1", "Other", base_time())).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_negative_price_is_rejected_by_schema() {
        let repo = repo().await;
        let mut bad = item("f-1", "Bad", base_time());
        bad.price_cents = -1;

        let err = repo.insert(&bad).await.unwrap_err();
        assert!(matches!(err, DbError::ConstraintViolation { .. }));
    }
}
