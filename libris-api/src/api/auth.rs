//! Token authentication middleware
//!
//! Every `/api` route requires `Authorization: Token <token>`; the token is
//! resolved against the `auth_tokens` table and the matching user is attached
//! to the request as a `CurrentUser` extension. Token issuance and account
//! lifecycle are provisioned externally.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::error::ApiError;
use crate::AppState;

/// Authenticated principal for the current request
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CurrentUser {
    pub guid: String,
    pub username: String,
    pub is_admin: bool,
}

impl CurrentUser {
    /// Catalog-management mutations are admin-only; reads are open to any
    /// authenticated user.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(ApiError::Forbidden(
                "administrator privileges required".to_string(),
            ))
        }
    }
}

/// Authentication middleware for protected routes.
///
/// Returns 401 when the header is missing, malformed, or names an unknown
/// token. `/health` does not pass through here.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = header
        .strip_prefix("Token ")
        .ok_or(AuthError::MissingToken)?
        .trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    let user = sqlx::query_as::<_, CurrentUser>(
        "SELECT u.guid, u.username, u.is_admin FROM auth_tokens t \
         JOIN users u ON u.guid = t.user_guid WHERE t.token = ?",
    )
    .bind(token)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| AuthError::Database(e.to_string()))?;

    let user = match user {
        Some(user) => user,
        None => {
            warn!("Rejected request with unknown auth token");
            return Err(AuthError::InvalidToken);
        }
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Authentication error types for HTTP responses
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    Database(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Missing or malformed Authorization header".to_string(),
            ),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
            AuthError::Database(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Authentication error: {}", msg),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": if status == StatusCode::UNAUTHORIZED { "UNAUTHORIZED" } else { "INTERNAL_ERROR" },
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
