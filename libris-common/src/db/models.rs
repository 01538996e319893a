//! Database row models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated principal. Readers are users; administrators carry the
/// `is_admin` flag. Account lifecycle (creation, activation, password reset)
/// is provisioned externally.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub guid: String,
    pub username: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub guid: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Author {
    pub guid: String,
    pub name: String,
}

/// Catalog entry. Authors are attached through the `book_authors` link table
/// and are not part of this row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub guid: String,
    pub name: String,
    pub description: String,
    pub category_guid: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub guid: String,
    pub book_guid: String,
    pub reader_guid: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-reader, per-book high-water mark of reading completion.
/// At most one row exists per (reader, book) pair and `percent` never
/// decreases over the row's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProgressRecord {
    pub guid: String,
    pub book_guid: String,
    pub reader_guid: String,
    pub percent: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
