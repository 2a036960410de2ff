//! # Menu Service
//!
//! Menu CRUD with a read-through cache.
//!
//! The menu changes rarely (admin edits only) but is read on every billing
//! and order screen, so the service keeps the full list in memory and
//! refreshes it after each write.

use tracing::info;
use uuid::Uuid;

use dhaba_core::validation::{validate_category, validate_item_name, validate_price_paise, validate_search_query};
use dhaba_core::{filter_items, CoreError, MenuItem};
use dhaba_db::Database;

use crate::error::ServiceResult;

/// Menu administration and lookup service.
#[derive(Debug, Clone)]
pub struct MenuService {
    db: Database,
    cache: Vec<MenuItem>,
}

impl MenuService {
    /// Creates the service and loads the menu.
    pub async fn new(db: Database) -> ServiceResult<Self> {
        let cache = db.menu_items().list_all().await?;
        info!(items = cache.len(), "Menu loaded");
        Ok(MenuService { db, cache })
    }

    /// The cached menu, grouped by category then name.
    pub fn items(&self) -> &[MenuItem] {
        &self.cache
    }

    /// Case-insensitive search over name and category. An empty query
    /// returns the whole menu.
    pub fn search(&self, query: &str) -> ServiceResult<Vec<&MenuItem>> {
        let query = validate_search_query(query).map_err(CoreError::from)?;
        Ok(filter_items(&self.cache, &query))
    }

    /// Re-reads the menu from the store.
    pub async fn refresh(&mut self) -> ServiceResult<()> {
        self.cache = self.db.menu_items().list_all().await?;
        Ok(())
    }

    /// Creates a menu item.
    pub async fn create_item(
        &mut self,
        name: &str,
        price_paise: i64,
        category: &str,
    ) -> ServiceResult<MenuItem> {
        validate_item_name(name).map_err(CoreError::from)?;
        validate_price_paise(price_paise).map_err(CoreError::from)?;
        validate_category(category).map_err(CoreError::from)?;

        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            price_paise,
            category: category.trim().to_string(),
        };

        self.db.menu_items().insert(&item).await?;
        self.refresh().await?;

        info!(id = %item.id, name = %item.name, "Menu item created");
        Ok(item)
    }

    /// Updates a menu item. Open bills keep their snapshots; only future
    /// adds see the change.
    pub async fn update_item(&mut self, item: &MenuItem) -> ServiceResult<()> {
        validate_item_name(&item.name).map_err(CoreError::from)?;
        validate_price_paise(item.price_paise).map_err(CoreError::from)?;
        validate_category(&item.category).map_err(CoreError::from)?;

        self.db.menu_items().update(item).await?;
        self.refresh().await?;
        Ok(())
    }

    /// Deletes a menu item.
    pub async fn delete_item(&mut self, id: &str) -> ServiceResult<()> {
        self.db.menu_items().delete(id).await?;
        self.refresh().await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use dhaba_db::DbConfig;

    async fn service() -> MenuService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        MenuService::new(db).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_search() {
        let mut menu = service().await;

        menu.create_item("Butter Naan", 4000, "Breads").await.unwrap();
        menu.create_item("Garlic Naan", 5000, "Breads").await.unwrap();
        menu.create_item("Masala Chai", 1500, "Beverages")
            .await
            .unwrap();

        assert_eq!(menu.items().len(), 3);
        assert_eq!(menu.search("naan").unwrap().len(), 2);
        assert_eq!(menu.search("beverages").unwrap().len(), 1);
        assert_eq!(menu.search("").unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let mut menu = service().await;

        let err = menu.create_item("", 4000, "Breads").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = menu
            .create_item("Naan", -10, "Breads")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(menu.items().is_empty());
    }

    #[tokio::test]
    async fn test_update_refreshes_cache() {
        let mut menu = service().await;
        let mut item = menu
            .create_item("Masala Dosa", 9000, "Main Courses")
            .await
            .unwrap();

        item.price_paise = 10500;
        menu.update_item(&item).await.unwrap();

        assert_eq!(menu.items()[0].price_paise, 10500);
    }

    #[tokio::test]
    async fn test_delete_missing_item() {
        let mut menu = service().await;
        let err = menu.delete_item("no-such-id").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
