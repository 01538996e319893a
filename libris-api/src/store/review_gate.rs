//! Review eligibility rule
//!
//! A reader may post a review for a book only when their tracked progress has
//! reached 100 percent AND no review by them exists for that book yet. One
//! completion unlocks exactly one reviewing opportunity; once any review is
//! present the gate stays closed regardless of later progress submissions.

use libris_common::{Error, Result};
use sqlx::SqlitePool;

use crate::store::ProgressStore;

#[derive(Clone)]
pub struct ReviewGate {
    db: SqlitePool,
}

impl ReviewGate {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Whether a new review submission is currently allowed for (reader, book).
    ///
    /// Pure derivation over stored state, performs no writes. A reader with no
    /// progress record is treated exactly like a reader at 0% (not eligible);
    /// a missing book is the caller's concern, not conflated with "no
    /// progress".
    pub async fn can_review(&self, reader_guid: &str, book_guid: &str) -> Result<bool> {
        let progress = ProgressStore::new(self.db.clone())
            .get_progress(reader_guid, book_guid)
            .await?;

        match progress {
            Some(record) if record.percent >= 100 => {}
            _ => return Ok(false),
        }

        let has_review: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE reader_guid = ? AND book_guid = ?)",
        )
        .bind(reader_guid)
        .bind(book_guid)
        .fetch_one(&self.db)
        .await?;

        Ok(!has_review)
    }

    /// Fail with `NotEligible` unless `can_review` holds.
    ///
    /// Called immediately before inserting a review so the check and the
    /// write sit as close together as the request model allows. Two racing
    /// creations can still both pass; that window is accepted (see DESIGN.md).
    pub async fn assert_reviewable(&self, reader_guid: &str, book_guid: &str) -> Result<()> {
        if self.can_review(reader_guid, book_guid).await? {
            Ok(())
        } else {
            Err(Error::NotEligible(
                "review requires completed reading progress and no existing review".to_string(),
            ))
        }
    }
}
