//! Author repository
//!
//! Authors attach to books through the `book_authors` link table; deleting an
//! author only removes the links, never the books.

use libris_common::db::models::Author;
use libris_common::{Error, Result};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Author with its book count, for listing endpoints
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AuthorView {
    pub guid: String,
    pub name: String,
    pub book_count: i64,
}

#[derive(Clone)]
pub struct AuthorStore {
    db: SqlitePool,
}

impl AuthorStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<AuthorView>> {
        let authors = sqlx::query_as::<_, AuthorView>(
            "SELECT a.guid, a.name, COUNT(ba.book_guid) AS book_count \
             FROM authors a LEFT JOIN book_authors ba ON ba.author_guid = a.guid \
             GROUP BY a.guid ORDER BY a.name ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(authors)
    }

    pub async fn get(&self, guid: &str) -> Result<AuthorView> {
        sqlx::query_as::<_, AuthorView>(
            "SELECT a.guid, a.name, COUNT(ba.book_guid) AS book_count \
             FROM authors a LEFT JOIN book_authors ba ON ba.author_guid = a.guid \
             WHERE a.guid = ? GROUP BY a.guid",
        )
        .bind(guid)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| Error::NotFound(format!("author {}", guid)))
    }

    pub async fn create(&self, name: &str) -> Result<Author> {
        if name.trim().is_empty() {
            return Err(Error::InvalidInput("author name must not be empty".to_string()));
        }

        let guid = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO authors (guid, name) VALUES (?, ?)")
            .bind(&guid)
            .bind(name)
            .execute(&self.db)
            .await?;

        Ok(Author {
            guid,
            name: name.to_string(),
        })
    }

    pub async fn update(&self, guid: &str, name: &str) -> Result<Author> {
        if name.trim().is_empty() {
            return Err(Error::InvalidInput("author name must not be empty".to_string()));
        }

        let result = sqlx::query("UPDATE authors SET name = ? WHERE guid = ?")
            .bind(name)
            .bind(guid)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("author {}", guid)));
        }

        Ok(Author {
            guid: guid.to_string(),
            name: name.to_string(),
        })
    }

    pub async fn delete(&self, guid: &str) -> Result<()> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM book_authors WHERE author_guid = ?")
            .bind(guid)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM authors WHERE guid = ?")
            .bind(guid)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("author {}", guid)));
        }

        tx.commit().await?;
        Ok(())
    }
}
