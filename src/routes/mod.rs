pub mod movies;

use axum::Router;
use sqlx::SqlitePool;
use std::time::Duration;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub query_timeout: Duration,
}

impl axum::extract::FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(movies::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
