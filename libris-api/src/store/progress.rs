//! Reading-progress store
//!
//! One row per (reader, book) pair holding the high-water mark of reading
//! completion. Updates are monotonic: a submission at or below the stored
//! percent changes nothing and raises no error, so clients may retry freely.
//!
//! The merge is a single conditional UPSERT, serialized by SQLite, so a stale
//! lower value can never clobber a higher one even under racing requests.

use chrono::Utc;
use libris_common::db::models::ProgressRecord;
use libris_common::{Error, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Clone)]
pub struct ProgressStore {
    db: SqlitePool,
}

impl ProgressStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Record a progress submission for (reader, book).
    ///
    /// Creates the record lazily on first submission with whatever percent is
    /// supplied. On later submissions the stored value only moves up:
    /// "set iff greater" is applied atomically at the storage layer.
    ///
    /// Returns the post-merge record, so callers always observe the current
    /// high-water mark rather than the value they submitted.
    pub async fn record_progress(
        &self,
        reader_guid: &str,
        book_guid: &str,
        percent: i64,
    ) -> Result<ProgressRecord> {
        if !(0..=100).contains(&percent) {
            return Err(Error::InvalidInput(format!(
                "percent must be between 0 and 100 (got {})",
                percent
            )));
        }

        self.assert_book_exists(book_guid).await?;
        self.assert_reader_exists(reader_guid).await?;

        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO progress_records (guid, book_guid, reader_guid, percent, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (reader_guid, book_guid)
            DO UPDATE SET percent = excluded.percent, updated_at = excluded.updated_at
            WHERE excluded.percent > progress_records.percent
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(book_guid)
        .bind(reader_guid)
        .bind(percent)
        .bind(now)
        .bind(now)
        .execute(&self.db)
        .await?;

        // The row is guaranteed to exist after the upsert
        let record = self
            .get_progress(reader_guid, book_guid)
            .await?
            .ok_or_else(|| Error::Internal("progress record missing after upsert".to_string()))?;

        Ok(record)
    }

    /// Fetch the progress record for (reader, book), if any.
    ///
    /// Absence is not an error; callers treat it as 0% for eligibility.
    pub async fn get_progress(
        &self,
        reader_guid: &str,
        book_guid: &str,
    ) -> Result<Option<ProgressRecord>> {
        let record = sqlx::query_as::<_, ProgressRecord>(
            "SELECT * FROM progress_records WHERE reader_guid = ? AND book_guid = ?",
        )
        .bind(reader_guid)
        .bind(book_guid)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }

    /// All progress records for one reader, most recently touched first
    pub async fn list_for_reader(&self, reader_guid: &str) -> Result<Vec<ProgressRecord>> {
        let records = sqlx::query_as::<_, ProgressRecord>(
            "SELECT * FROM progress_records WHERE reader_guid = ? \
             ORDER BY updated_at DESC, guid ASC",
        )
        .bind(reader_guid)
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }

    async fn assert_book_exists(&self, book_guid: &str) -> Result<()> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE guid = ?)")
            .bind(book_guid)
            .fetch_one(&self.db)
            .await?;

        if exists {
            Ok(())
        } else {
            Err(Error::NotFound(format!("book {}", book_guid)))
        }
    }

    async fn assert_reader_exists(&self, reader_guid: &str) -> Result<()> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE guid = ?)")
            .bind(reader_guid)
            .fetch_one(&self.db)
            .await?;

        if exists {
            Ok(())
        } else {
            Err(Error::NotFound(format!("reader {}", reader_guid)))
        }
    }
}
