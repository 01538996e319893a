//! HTTP API handlers for libris-api

pub mod auth;
pub mod authors;
pub mod books;
pub mod categories;
pub mod health;
pub mod progress;
pub mod reviews;

pub use auth::{auth_middleware, CurrentUser};
pub use health::health_routes;
