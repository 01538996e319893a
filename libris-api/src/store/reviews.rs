//! Review persistence
//!
//! Eligibility is NOT checked here; callers run `ReviewGate::assert_reviewable`
//! first. Ownership checks on update/delete live in the HTTP layer.

use chrono::Utc;
use libris_common::db::models::Review;
use libris_common::{Error, Result};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Review joined with its book's name, for listing endpoints
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReviewView {
    pub guid: String,
    pub book_guid: String,
    pub book_name: String,
    pub reader_guid: String,
    pub body: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Clone)]
pub struct ReviewStore {
    db: SqlitePool,
}

impl ReviewStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create(&self, book_guid: &str, reader_guid: &str, body: &str) -> Result<Review> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE guid = ?)")
            .bind(book_guid)
            .fetch_one(&self.db)
            .await?;
        if !exists {
            return Err(Error::NotFound(format!("book {}", book_guid)));
        }

        let guid = Uuid::new_v4().to_string();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO reviews (guid, book_guid, reader_guid, body, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&guid)
        .bind(book_guid)
        .bind(reader_guid)
        .bind(body)
        .bind(now)
        .bind(now)
        .execute(&self.db)
        .await?;

        self.get(&guid).await
    }

    pub async fn get(&self, guid: &str) -> Result<Review> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE guid = ?")
            .bind(guid)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("review {}", guid)))
    }

    /// All reviews with their book names, newest first
    pub async fn list(&self) -> Result<Vec<ReviewView>> {
        let reviews = sqlx::query_as::<_, ReviewView>(
            "SELECT r.guid, r.book_guid, b.name AS book_name, r.reader_guid, \
                    r.body, r.created_at, r.updated_at \
             FROM reviews r JOIN books b ON b.guid = r.book_guid \
             ORDER BY r.created_at DESC, r.guid ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(reviews)
    }

    pub async fn update_body(&self, guid: &str, body: &str) -> Result<Review> {
        let result = sqlx::query("UPDATE reviews SET body = ?, updated_at = ? WHERE guid = ?")
            .bind(body)
            .bind(Utc::now())
            .bind(guid)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("review {}", guid)));
        }

        self.get(guid).await
    }

    pub async fn delete(&self, guid: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE guid = ?")
            .bind(guid)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("review {}", guid)));
        }

        Ok(())
    }
}
