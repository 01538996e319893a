//! Category repository
//!
//! Category deletion removes the category's books and everything hanging off
//! them (reviews, progress records, author links) in one transaction.

use libris_common::db::models::Category;
use libris_common::{Error, Result};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Category with its book count, for listing endpoints
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CategoryView {
    pub guid: String,
    pub name: String,
    pub book_count: i64,
}

#[derive(Clone)]
pub struct CategoryStore {
    db: SqlitePool,
}

impl CategoryStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<CategoryView>> {
        let categories = sqlx::query_as::<_, CategoryView>(
            "SELECT c.guid, c.name, COUNT(b.guid) AS book_count \
             FROM categories c LEFT JOIN books b ON b.category_guid = c.guid \
             GROUP BY c.guid ORDER BY c.name ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(categories)
    }

    pub async fn get(&self, guid: &str) -> Result<CategoryView> {
        sqlx::query_as::<_, CategoryView>(
            "SELECT c.guid, c.name, COUNT(b.guid) AS book_count \
             FROM categories c LEFT JOIN books b ON b.category_guid = c.guid \
             WHERE c.guid = ? GROUP BY c.guid",
        )
        .bind(guid)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| Error::NotFound(format!("category {}", guid)))
    }

    pub async fn create(&self, name: &str) -> Result<Category> {
        if name.trim().is_empty() {
            return Err(Error::InvalidInput("category name must not be empty".to_string()));
        }

        let guid = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO categories (guid, name) VALUES (?, ?)")
            .bind(&guid)
            .bind(name)
            .execute(&self.db)
            .await?;

        Ok(Category {
            guid,
            name: name.to_string(),
        })
    }

    pub async fn update(&self, guid: &str, name: &str) -> Result<Category> {
        if name.trim().is_empty() {
            return Err(Error::InvalidInput("category name must not be empty".to_string()));
        }

        let result = sqlx::query("UPDATE categories SET name = ? WHERE guid = ?")
            .bind(name)
            .bind(guid)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("category {}", guid)));
        }

        Ok(Category {
            guid: guid.to_string(),
            name: name.to_string(),
        })
    }

    /// Delete a category and cascade to its books, their reviews, progress
    /// records and author links, atomically.
    pub async fn delete(&self, guid: &str) -> Result<()> {
        let mut tx = self.db.begin().await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE guid = ?)")
                .bind(guid)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Err(Error::NotFound(format!("category {}", guid)));
        }

        sqlx::query(
            "DELETE FROM reviews WHERE book_guid IN (SELECT guid FROM books WHERE category_guid = ?)",
        )
        .bind(guid)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM progress_records WHERE book_guid IN \
             (SELECT guid FROM books WHERE category_guid = ?)",
        )
        .bind(guid)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM book_authors WHERE book_guid IN \
             (SELECT guid FROM books WHERE category_guid = ?)",
        )
        .bind(guid)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM books WHERE category_guid = ?")
            .bind(guid)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM categories WHERE guid = ?")
            .bind(guid)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
