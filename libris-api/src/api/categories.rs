//! Category endpoints
//!
//! Reads are open to any authenticated user; mutations require admin.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use libris_common::db::models::Category;
use serde::Deserialize;

use crate::api::auth::CurrentUser;
use crate::error::ApiResult;
use crate::store::catalog::BookSummary;
use crate::store::categories::CategoryView;
use crate::store::{CatalogQuery, CategoryStore};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
}

/// GET /api/category
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<CategoryView>>> {
    let categories = CategoryStore::new(state.db.clone()).list().await?;
    Ok(Json(categories))
}

/// GET /api/category/:id
pub async fn get(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> ApiResult<Json<CategoryView>> {
    let category = CategoryStore::new(state.db.clone()).get(&guid).await?;
    Ok(Json(category))
}

/// GET /api/category/books/:id — all books in the category
pub async fn books(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> ApiResult<Json<Vec<BookSummary>>> {
    let books = CatalogQuery::new(state.db.clone())
        .books_in_category(&guid)
        .await?;
    Ok(Json(books))
}

/// POST /api/category (admin)
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CategoryPayload>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    user.require_admin()?;
    let category = CategoryStore::new(state.db.clone())
        .create(&payload.name)
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/category/:id (admin)
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(guid): Path<String>,
    Json(payload): Json<CategoryPayload>,
) -> ApiResult<Json<Category>> {
    user.require_admin()?;
    let category = CategoryStore::new(state.db.clone())
        .update(&guid, &payload.name)
        .await?;
    Ok(Json(category))
}

/// DELETE /api/category/:id (admin) — cascades to the category's books
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(guid): Path<String>,
) -> ApiResult<StatusCode> {
    user.require_admin()?;
    CategoryStore::new(state.db.clone()).delete(&guid).await?;
    Ok(StatusCode::NO_CONTENT)
}
