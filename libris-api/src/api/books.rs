//! Book catalog endpoints
//!
//! Listing returns summaries in a `{ data, meta }` envelope; the detail view
//! is the one place the review-eligibility flag is computed.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use libris_common::db::models::Book;
use serde::Deserialize;

use crate::api::auth::CurrentUser;
use crate::error::ApiResult;
use crate::pagination::Page;
use crate::store::catalog::{BookDetail, BookFilters, BookSummary};
use crate::store::{BookStore, CatalogQuery};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    pub page_size: Option<i64>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub search: Option<String>,
}

fn default_page() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct BookPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub authors: Vec<String>,
}

/// GET /api/book-catalog
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Page<BookSummary>>> {
    let page_size = query
        .page_size
        .unwrap_or(state.page_size)
        .clamp(1, 100);

    let filters = BookFilters {
        category: query.category,
        author: query.author,
        search: query.search,
    };

    let page = CatalogQuery::new(state.db.clone())
        .list_books(query.page, page_size, &filters)
        .await?;
    Ok(Json(page))
}

/// GET /api/book-catalog/:id
///
/// `can_review` is computed for the requesting reader.
pub async fn detail(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(guid): Path<String>,
) -> ApiResult<Json<BookDetail>> {
    let detail = CatalogQuery::new(state.db.clone())
        .get_book_detail(&guid, Some(&user.guid))
        .await?;
    Ok(Json(detail))
}

/// POST /api/book-catalog (admin)
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<BookPayload>,
) -> ApiResult<(StatusCode, Json<Book>)> {
    user.require_admin()?;
    let book = BookStore::new(state.db.clone())
        .create(
            &payload.name,
            &payload.description,
            &payload.category,
            &payload.authors,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// PUT /api/book-catalog/:id (admin)
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(guid): Path<String>,
    Json(payload): Json<BookPayload>,
) -> ApiResult<Json<Book>> {
    user.require_admin()?;
    let book = BookStore::new(state.db.clone())
        .update(
            &guid,
            &payload.name,
            &payload.description,
            &payload.category,
            Some(&payload.authors),
        )
        .await?;
    Ok(Json(book))
}

/// DELETE /api/book-catalog/:id (admin) — cascades to reviews and progress
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(guid): Path<String>,
) -> ApiResult<StatusCode> {
    user.require_admin()?;
    BookStore::new(state.db.clone()).delete(&guid).await?;
    Ok(StatusCode::NO_CONTENT)
}
