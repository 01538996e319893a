//! Shared fixtures for libris-api integration tests
//!
//! Tests run against an in-memory SQLite database with the real schema;
//! users, tokens and catalog rows are seeded directly.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request};
use axum::Router;
use libris_api::{build_router, AppState};
use libris_common::db::init_memory_database;
use serde_json::Value;
use sqlx::SqlitePool;
use uuid::Uuid;

pub const TEST_PAGE_SIZE: i64 = 20;

pub async fn setup_pool() -> SqlitePool {
    init_memory_database()
        .await
        .expect("Should create in-memory database")
}

pub fn setup_app(pool: SqlitePool) -> Router {
    build_router(AppState::new(pool, TEST_PAGE_SIZE))
}

/// Insert a user plus an auth token; returns (user guid, token)
pub async fn seed_user(pool: &SqlitePool, username: &str, is_admin: bool) -> (String, String) {
    let guid = Uuid::new_v4().to_string();
    let token = Uuid::new_v4().to_string();

    sqlx::query("INSERT INTO users (guid, username, is_admin) VALUES (?, ?, ?)")
        .bind(&guid)
        .bind(username)
        .bind(is_admin)
        .execute(pool)
        .await
        .unwrap();

    sqlx::query("INSERT INTO auth_tokens (token, user_guid) VALUES (?, ?)")
        .bind(&token)
        .bind(&guid)
        .execute(pool)
        .await
        .unwrap();

    (guid, token)
}

pub async fn seed_category(pool: &SqlitePool, name: &str) -> String {
    let guid = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO categories (guid, name) VALUES (?, ?)")
        .bind(&guid)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
    guid
}

pub async fn seed_author(pool: &SqlitePool, name: &str) -> String {
    let guid = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO authors (guid, name) VALUES (?, ?)")
        .bind(&guid)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
    guid
}

pub async fn seed_book(pool: &SqlitePool, name: &str, category_guid: &str) -> String {
    let guid = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO books (guid, name, category_guid) VALUES (?, ?, ?)")
        .bind(&guid)
        .bind(name)
        .bind(category_guid)
        .execute(pool)
        .await
        .unwrap();
    guid
}

pub async fn link_book_author(pool: &SqlitePool, book_guid: &str, author_guid: &str) {
    sqlx::query("INSERT INTO book_authors (book_guid, author_guid) VALUES (?, ?)")
        .bind(book_guid)
        .bind(author_guid)
        .execute(pool)
        .await
        .unwrap();
}

pub fn get_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Token {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Token {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}
