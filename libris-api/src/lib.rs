//! libris-api library — book catalog REST service
//!
//! Exposes `AppState` and `build_router` so integration tests can drive the
//! full router without binding a socket.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod pagination;
pub mod store;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Default page size for listings
    pub page_size: i64,
}

impl AppState {
    pub fn new(db: SqlitePool, page_size: i64) -> Self {
        Self { db, page_size }
    }
}

/// Build application router.
///
/// All `/api` routes sit behind token authentication; `/health` is public.
/// Admin-only enforcement for catalog mutations happens in the handlers via
/// `CurrentUser::require_admin`.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::get;

    let protected = Router::new()
        .route(
            "/api/category",
            get(api::categories::list).post(api::categories::create),
        )
        .route(
            "/api/category/:id",
            get(api::categories::get)
                .put(api::categories::update)
                .delete(api::categories::delete),
        )
        .route("/api/category/books/:id", get(api::categories::books))
        .route(
            "/api/author",
            get(api::authors::list).post(api::authors::create),
        )
        .route(
            "/api/author/:id",
            get(api::authors::get)
                .put(api::authors::update)
                .delete(api::authors::delete),
        )
        .route("/api/author/books/:id", get(api::authors::books))
        .route(
            "/api/book-catalog",
            get(api::books::list).post(api::books::create),
        )
        .route(
            "/api/book-catalog/:id",
            get(api::books::detail)
                .put(api::books::update)
                .delete(api::books::delete),
        )
        .route(
            "/api/review",
            get(api::reviews::list).post(api::reviews::create),
        )
        .route(
            "/api/review/:id",
            get(api::reviews::get)
                .put(api::reviews::update)
                .delete(api::reviews::delete),
        )
        .route(
            "/api/track-readed-books",
            get(api::progress::list).post(api::progress::create),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth_middleware,
        ));

    let public = Router::new().merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
