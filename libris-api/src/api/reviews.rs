//! Review endpoints
//!
//! Creation is gated by the review-eligibility rule; update and delete are
//! restricted to the owning reader (admins may also delete).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use libris_common::db::models::Review;
use serde::Deserialize;

use crate::api::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::store::reviews::ReviewView;
use crate::store::{ReviewGate, ReviewStore};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateReviewPayload {
    pub book: String,
    pub review: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewPayload {
    pub review: String,
}

/// GET /api/review
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ReviewView>>> {
    let reviews = ReviewStore::new(state.db.clone()).list().await?;
    Ok(Json(reviews))
}

/// GET /api/review/:id
pub async fn get(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> ApiResult<Json<Review>> {
    let review = ReviewStore::new(state.db.clone()).get(&guid).await?;
    Ok(Json(review))
}

/// POST /api/review
///
/// Checked against the gate immediately before the insert. Two racing
/// requests can both pass the check; that window is accepted.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateReviewPayload>,
) -> ApiResult<(StatusCode, Json<Review>)> {
    if payload.review.trim().is_empty() {
        return Err(ApiError::BadRequest("review text must not be empty".to_string()));
    }

    // Distinguish "book not found" from "not eligible" before gating
    let store = ReviewStore::new(state.db.clone());
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE guid = ?)")
        .bind(&payload.book)
        .fetch_one(&state.db)
        .await
        .map_err(libris_common::Error::from)?;
    if !exists {
        return Err(ApiError::NotFound(format!("book {}", payload.book)));
    }

    ReviewGate::new(state.db.clone())
        .assert_reviewable(&user.guid, &payload.book)
        .await?;

    let review = store.create(&payload.book, &user.guid, &payload.review).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// PUT /api/review/:id (owner only)
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(guid): Path<String>,
    Json(payload): Json<UpdateReviewPayload>,
) -> ApiResult<Json<Review>> {
    let store = ReviewStore::new(state.db.clone());
    let existing = store.get(&guid).await?;
    if existing.reader_guid != user.guid {
        return Err(ApiError::Forbidden("only the review's author may edit it".to_string()));
    }

    let review = store.update_body(&guid, &payload.review).await?;
    Ok(Json(review))
}

/// DELETE /api/review/:id (owner or admin)
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(guid): Path<String>,
) -> ApiResult<StatusCode> {
    let store = ReviewStore::new(state.db.clone());
    let existing = store.get(&guid).await?;
    if existing.reader_guid != user.guid && !user.is_admin {
        return Err(ApiError::Forbidden("only the review's author may delete it".to_string()));
    }

    store.delete(&guid).await?;
    Ok(StatusCode::NO_CONTENT)
}
