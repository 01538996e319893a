//! Catalog query facade (read side)
//!
//! Composes book metadata with category, authors, reviews and the per-reader
//! review-eligibility flag. The flag is only computed on detail fetches;
//! summaries stay cheap.

use libris_common::db::models::{Author, Book, Category, Review};
use libris_common::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::pagination::{calculate_pagination, Page, PageMeta};
use crate::store::ReviewGate;

/// Optional filters for book listings
#[derive(Debug, Default, Clone, Deserialize)]
pub struct BookFilters {
    /// Restrict to one category (guid)
    pub category: Option<String>,
    /// Restrict to books by one author (guid)
    pub author: Option<String>,
    /// Case-insensitive substring match on the book name
    pub search: Option<String>,
}

/// Book as rendered in listings: no reviews, no eligibility flag
#[derive(Debug, Clone, Serialize)]
pub struct BookSummary {
    pub guid: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub authors: Vec<Author>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Full book view: summary fields plus reviews and `can_review`
#[derive(Debug, Clone, Serialize)]
pub struct BookDetail {
    pub guid: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub authors: Vec<Author>,
    pub reviews: Vec<Review>,
    pub can_review: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Clone)]
pub struct CatalogQuery {
    db: SqlitePool,
}

impl CatalogQuery {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Full detail for one book.
    ///
    /// Reviews are ordered by creation time ascending (guid as tie-break) for
    /// deterministic output. `can_review` is false whenever no reader identity
    /// is supplied; that is not an error.
    pub async fn get_book_detail(
        &self,
        book_guid: &str,
        reader_guid: Option<&str>,
    ) -> Result<BookDetail> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE guid = ?")
            .bind(book_guid)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("book {}", book_guid)))?;

        let category = self.category_of(&book).await?;
        let authors = self.authors_of(&book.guid).await?;

        let reviews = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE book_guid = ? ORDER BY created_at ASC, guid ASC",
        )
        .bind(&book.guid)
        .fetch_all(&self.db)
        .await?;

        let can_review = match reader_guid {
            Some(reader) => {
                ReviewGate::new(self.db.clone())
                    .can_review(reader, &book.guid)
                    .await?
            }
            None => false,
        };

        Ok(BookDetail {
            guid: book.guid,
            name: book.name,
            description: book.description,
            category,
            authors,
            reviews,
            can_review,
            created_at: book.created_at,
            updated_at: book.updated_at,
        })
    }

    /// Paginated book listing, newest first
    pub async fn list_books(
        &self,
        requested_page: i64,
        page_size: i64,
        filters: &BookFilters,
    ) -> Result<Page<BookSummary>> {
        let search_pattern = filters.search.as_ref().map(|s| format!("%{}%", s));

        let mut clauses: Vec<&str> = Vec::new();
        if filters.category.is_some() {
            clauses.push("category_guid = ?");
        }
        if filters.author.is_some() {
            clauses.push("guid IN (SELECT book_guid FROM book_authors WHERE author_guid = ?)");
        }
        if search_pattern.is_some() {
            clauses.push("name LIKE ?");
        }
        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM books{}", where_sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(category) = &filters.category {
            count_query = count_query.bind(category);
        }
        if let Some(author) = &filters.author {
            count_query = count_query.bind(author);
        }
        if let Some(pattern) = &search_pattern {
            count_query = count_query.bind(pattern);
        }
        let total_records = count_query.fetch_one(&self.db).await?;

        let pagination = calculate_pagination(total_records, requested_page, page_size);

        let select_sql = format!(
            "SELECT * FROM books{} ORDER BY created_at DESC, guid ASC LIMIT ? OFFSET ?",
            where_sql
        );
        let mut select_query = sqlx::query_as::<_, Book>(&select_sql);
        if let Some(category) = &filters.category {
            select_query = select_query.bind(category);
        }
        if let Some(author) = &filters.author {
            select_query = select_query.bind(author);
        }
        if let Some(pattern) = &search_pattern {
            select_query = select_query.bind(pattern);
        }
        let books = select_query
            .bind(page_size)
            .bind(pagination.offset)
            .fetch_all(&self.db)
            .await?;

        let mut data = Vec::with_capacity(books.len());
        for book in books {
            data.push(self.summarize(book).await?);
        }

        Ok(Page {
            data,
            meta: PageMeta {
                total_records,
                page: pagination.page,
                page_size,
                total_pages: pagination.total_pages,
            },
        })
    }

    /// All books in one category (unpaginated), newest first.
    /// Fails with `NotFound` for an unknown category.
    pub async fn books_in_category(&self, category_guid: &str) -> Result<Vec<BookSummary>> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE guid = ?)")
                .bind(category_guid)
                .fetch_one(&self.db)
                .await?;
        if !exists {
            return Err(Error::NotFound(format!("category {}", category_guid)));
        }

        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE category_guid = ? ORDER BY created_at DESC, guid ASC",
        )
        .bind(category_guid)
        .fetch_all(&self.db)
        .await?;

        let mut summaries = Vec::with_capacity(books.len());
        for book in books {
            summaries.push(self.summarize(book).await?);
        }
        Ok(summaries)
    }

    /// All books by one author (unpaginated), newest first.
    /// Fails with `NotFound` for an unknown author.
    pub async fn books_by_author(&self, author_guid: &str) -> Result<Vec<BookSummary>> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE guid = ?)")
            .bind(author_guid)
            .fetch_one(&self.db)
            .await?;
        if !exists {
            return Err(Error::NotFound(format!("author {}", author_guid)));
        }

        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE guid IN \
             (SELECT book_guid FROM book_authors WHERE author_guid = ?) \
             ORDER BY created_at DESC, guid ASC",
        )
        .bind(author_guid)
        .fetch_all(&self.db)
        .await?;

        let mut summaries = Vec::with_capacity(books.len());
        for book in books {
            summaries.push(self.summarize(book).await?);
        }
        Ok(summaries)
    }

    async fn summarize(&self, book: Book) -> Result<BookSummary> {
        let category = self.category_of(&book).await?;
        let authors = self.authors_of(&book.guid).await?;

        Ok(BookSummary {
            guid: book.guid,
            name: book.name,
            description: book.description,
            category,
            authors,
            created_at: book.created_at,
            updated_at: book.updated_at,
        })
    }

    async fn category_of(&self, book: &Book) -> Result<Category> {
        sqlx::query_as::<_, Category>("SELECT guid, name FROM categories WHERE guid = ?")
            .bind(&book.category_guid)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| {
                Error::Internal(format!(
                    "book {} references missing category {}",
                    book.guid, book.category_guid
                ))
            })
    }

    async fn authors_of(&self, book_guid: &str) -> Result<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT a.guid, a.name FROM authors a \
             JOIN book_authors ba ON ba.author_guid = a.guid \
             WHERE ba.book_guid = ? ORDER BY a.name ASC",
        )
        .bind(book_guid)
        .fetch_all(&self.db)
        .await?;

        Ok(authors)
    }
}
