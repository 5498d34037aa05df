#![allow(dead_code, unused_imports)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tower::ServiceExt;

use movies_api::routes::{build_router, AppState};

pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("failed to create test pool");

    movies_api::db::run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

/// On-disk pool with several connections, for tests that need real concurrency.
pub async fn file_pool(path: &Path, max_connections: u32) -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(10))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .expect("failed to create file pool");

    movies_api::db::run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

pub fn test_app(pool: SqlitePool) -> Router {
    build_router(AppState {
        pool,
        query_timeout: Duration::from_secs(10),
    })
}

pub fn inception() -> Value {
    serde_json::json!({
        "title": "Inception",
        "description": "A thief who steals corporate secrets through dream-sharing technology.",
        "release_year": 2010,
        "poster": "https://example.com/inception.jpg",
        "director": { "first_name": "Christopher", "last_name": "Nolan" }
    })
}

pub fn movie_json(title: &str, year: i32, director: Option<(&str, &str)>) -> Value {
    let director = match director {
        Some((first_name, last_name)) => {
            serde_json::json!({ "first_name": first_name, "last_name": last_name })
        }
        None => Value::Null,
    };
    serde_json::json!({
        "title": title,
        "description": format!("{title} description"),
        "release_year": year,
        "poster": format!("/posters/{year}.jpg"),
        "director": director,
    })
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    send_raw("POST", uri, &body.to_string())
}

pub fn put_json(uri: &str, body: &Value) -> Request<Body> {
    send_raw("PUT", uri, &body.to_string())
}

pub fn send_raw(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body not json")
}

/// POSTs a movie and returns the created payload.
pub async fn create(app: &Router, body: &Value) -> Value {
    let response = app
        .clone()
        .oneshot(post_json("/movies", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
