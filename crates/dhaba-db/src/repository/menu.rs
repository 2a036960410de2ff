//! # Menu Repository
//!
//! Database operations for menu items.
//!
//! Admin CRUD only: the waiter-facing screens read the menu through the
//! service-layer cache, never directly from here.

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use dhaba_core::MenuItem;

/// Repository for menu item database operations.
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// Lists the whole menu, grouped by category then name.
    pub async fn list_all(&self) -> DbResult<Vec<MenuItem>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, price_paise, category
            FROM menu_items
            ORDER BY category, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_menu_item).collect()
    }

    /// Gets a menu item by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<MenuItem>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, price_paise, category
            FROM menu_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_menu_item).transpose()
    }

    /// Inserts a new menu item.
    pub async fn insert(&self, item: &MenuItem) -> DbResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting menu item");

        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO menu_items (id, name, price_paise, category, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.price_paise)
        .bind(&item.category)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing menu item's name, price, and category.
    ///
    /// Open bills and saved records are unaffected: they hold snapshots
    /// taken at add-time.
    pub async fn update(&self, item: &MenuItem) -> DbResult<()> {
        debug!(id = %item.id, "Updating menu item");

        let result = sqlx::query(
            r#"
            UPDATE menu_items
            SET name = ?2, price_paise = ?3, category = ?4, updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.price_paise)
        .bind(&item.category)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("MenuItem", &item.id));
        }
        Ok(())
    }

    /// Deletes a menu item.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting menu item");

        let result = sqlx::query("DELETE FROM menu_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("MenuItem", id));
        }
        Ok(())
    }

    /// Counts menu items (for seed/diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn row_to_menu_item(row: &sqlx::sqlite::SqliteRow) -> DbResult<MenuItem> {
    Ok(MenuItem {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        price_paise: row.try_get("price_paise")?,
        category: row.try_get("category")?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use uuid::Uuid;

    fn item(name: &str, price_paise: i64, category: &str) -> MenuItem {
        MenuItem {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price_paise,
            category: category.to_string(),
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let db = test_db().await;
        let repo = db.menu_items();

        repo.insert(&item("Masala Dosa", 9000, "Main Courses"))
            .await
            .unwrap();
        repo.insert(&item("Filter Coffee", 3000, "Beverages"))
            .await
            .unwrap();

        let menu = repo.list_all().await.unwrap();
        assert_eq!(menu.len(), 2);
        // Ordered by category: Beverages before Main Courses
        assert_eq!(menu[0].name, "Filter Coffee");
    }

    #[tokio::test]
    async fn test_update_changes_stored_item() {
        let db = test_db().await;
        let repo = db.menu_items();

        let mut dosa = item("Masala Dosa", 9000, "Main Courses");
        repo.insert(&dosa).await.unwrap();

        dosa.price_paise = 10500;
        repo.update(&dosa).await.unwrap();

        let stored = repo.get_by_id(&dosa.id).await.unwrap().unwrap();
        assert_eq!(stored.price_paise, 10500);
    }

    #[tokio::test]
    async fn test_update_missing_item() {
        let db = test_db().await;
        let repo = db.menu_items();

        let err = repo
            .update(&item("Ghost", 100, "Nowhere"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let repo = db.menu_items();

        let chai = item("Chai", 1500, "Beverages");
        repo.insert(&chai).await.unwrap();
        repo.delete(&chai.id).await.unwrap();

        assert!(repo.get_by_id(&chai.id).await.unwrap().is_none());

        let err = repo.delete(&chai.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_negative_price_rejected_by_schema() {
        let db = test_db().await;
        let repo = db.menu_items();

        let err = repo.insert(&item("Bad", -100, "Beverages")).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }
}
