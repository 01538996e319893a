//! Reading-progress endpoints

use axum::{extract::State, http::StatusCode, Extension, Json};
use libris_common::db::models::ProgressRecord;
use serde::Deserialize;

use crate::api::auth::CurrentUser;
use crate::error::ApiResult;
use crate::store::ProgressStore;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ProgressPayload {
    pub book: String,
    pub percent: i64,
}

/// GET /api/track-readed-books — the requesting reader's progress records
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<ProgressRecord>>> {
    let records = ProgressStore::new(state.db.clone())
        .list_for_reader(&user.guid)
        .await?;
    Ok(Json(records))
}

/// POST /api/track-readed-books
///
/// Idempotent monotonic merge: the response always carries the post-merge
/// record (the high-water mark), so a retried or stale submission returns the
/// current state rather than an error.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ProgressPayload>,
) -> ApiResult<(StatusCode, Json<ProgressRecord>)> {
    let record = ProgressStore::new(state.db.clone())
        .record_progress(&user.guid, &payload.book, payload.percent)
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}
