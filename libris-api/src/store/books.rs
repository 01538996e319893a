//! Book catalog repository (admin-side mutations)
//!
//! Deleting a book removes its reviews, progress records and author links in
//! one explicit transaction; nothing relies on schema-level cascades.

use chrono::Utc;
use libris_common::db::models::Book;
use libris_common::{Error, Result};
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

#[derive(Clone)]
pub struct BookStore {
    db: SqlitePool,
}

impl BookStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn get(&self, guid: &str) -> Result<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE guid = ?")
            .bind(guid)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("book {}", guid)))
    }

    pub async fn create(
        &self,
        name: &str,
        description: &str,
        category_guid: &str,
        author_guids: &[String],
    ) -> Result<Book> {
        if name.trim().is_empty() {
            return Err(Error::InvalidInput("book name must not be empty".to_string()));
        }

        let mut tx = self.db.begin().await?;

        assert_category_exists(&mut tx, category_guid).await?;

        let guid = Uuid::new_v4().to_string();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO books (guid, name, description, category_guid, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&guid)
        .bind(name)
        .bind(description)
        .bind(category_guid)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        link_authors(&mut tx, &guid, author_guids).await?;

        tx.commit().await?;
        self.get(&guid).await
    }

    /// Update a book's fields. `authors`, when supplied, replaces the full
    /// author set; `None` leaves existing links untouched.
    pub async fn update(
        &self,
        guid: &str,
        name: &str,
        description: &str,
        category_guid: &str,
        authors: Option<&[String]>,
    ) -> Result<Book> {
        if name.trim().is_empty() {
            return Err(Error::InvalidInput("book name must not be empty".to_string()));
        }

        let mut tx = self.db.begin().await?;

        assert_category_exists(&mut tx, category_guid).await?;

        let result = sqlx::query(
            "UPDATE books SET name = ?, description = ?, category_guid = ?, updated_at = ? \
             WHERE guid = ?",
        )
        .bind(name)
        .bind(description)
        .bind(category_guid)
        .bind(Utc::now())
        .bind(guid)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("book {}", guid)));
        }

        if let Some(author_guids) = authors {
            sqlx::query("DELETE FROM book_authors WHERE book_guid = ?")
                .bind(guid)
                .execute(&mut *tx)
                .await?;
            link_authors(&mut tx, guid, author_guids).await?;
        }

        tx.commit().await?;
        self.get(guid).await
    }

    /// Delete a book and everything hanging off it, atomically.
    pub async fn delete(&self, guid: &str) -> Result<()> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM reviews WHERE book_guid = ?")
            .bind(guid)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM progress_records WHERE book_guid = ?")
            .bind(guid)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM book_authors WHERE book_guid = ?")
            .bind(guid)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM books WHERE guid = ?")
            .bind(guid)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("book {}", guid)));
        }

        tx.commit().await?;
        Ok(())
    }
}

async fn assert_category_exists(tx: &mut Transaction<'_, Sqlite>, guid: &str) -> Result<()> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE guid = ?)")
        .bind(guid)
        .fetch_one(&mut **tx)
        .await?;

    if exists {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!("unknown category {}", guid)))
    }
}

async fn link_authors(
    tx: &mut Transaction<'_, Sqlite>,
    book_guid: &str,
    author_guids: &[String],
) -> Result<()> {
    for author_guid in author_guids {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE guid = ?)")
                .bind(author_guid)
                .fetch_one(&mut **tx)
                .await?;
        if !exists {
            return Err(Error::InvalidInput(format!("unknown author {}", author_guid)));
        }

        sqlx::query("INSERT OR IGNORE INTO book_authors (book_guid, author_guid) VALUES (?, ?)")
            .bind(book_guid)
            .bind(author_guid)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}
