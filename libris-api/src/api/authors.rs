//! Author endpoints
//!
//! Reads are open to any authenticated user; mutations require admin.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use libris_common::db::models::Author;
use serde::Deserialize;

use crate::api::auth::CurrentUser;
use crate::error::ApiResult;
use crate::store::authors::AuthorView;
use crate::store::catalog::BookSummary;
use crate::store::{AuthorStore, CatalogQuery};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AuthorPayload {
    pub name: String,
}

/// GET /api/author
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<AuthorView>>> {
    let authors = AuthorStore::new(state.db.clone()).list().await?;
    Ok(Json(authors))
}

/// GET /api/author/:id
pub async fn get(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> ApiResult<Json<AuthorView>> {
    let author = AuthorStore::new(state.db.clone()).get(&guid).await?;
    Ok(Json(author))
}

/// GET /api/author/books/:id — all books by the author
pub async fn books(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> ApiResult<Json<Vec<BookSummary>>> {
    let books = CatalogQuery::new(state.db.clone())
        .books_by_author(&guid)
        .await?;
    Ok(Json(books))
}

/// POST /api/author (admin)
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<AuthorPayload>,
) -> ApiResult<(StatusCode, Json<Author>)> {
    user.require_admin()?;
    let author = AuthorStore::new(state.db.clone())
        .create(&payload.name)
        .await?;
    Ok((StatusCode::CREATED, Json(author)))
}

/// PUT /api/author/:id (admin)
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(guid): Path<String>,
    Json(payload): Json<AuthorPayload>,
) -> ApiResult<Json<Author>> {
    user.require_admin()?;
    let author = AuthorStore::new(state.db.clone())
        .update(&guid, &payload.name)
        .await?;
    Ok(Json(author))
}

/// DELETE /api/author/:id (admin) — removes book links only
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(guid): Path<String>,
) -> ApiResult<StatusCode> {
    user.require_admin()?;
    AuthorStore::new(state.db.clone()).delete(&guid).await?;
    Ok(StatusCode::NO_CONTENT)
}
