use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::db::with_deadline;
use crate::error::AppError;
use crate::models::director;
use crate::models::movie::{self, MovieInput};
use crate::routes::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route(
            "/movies/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
}

/// Path ids arrive as opaque strings. One that is not an integer cannot match
/// any row, so it is reported the same way as a missing movie.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim().parse::<i64>().map_err(|_| {
        tracing::debug!(id = raw, "non-numeric movie id");
        AppError::NotFound("Movie")
    })
}

fn decode_body(payload: Result<Json<MovieInput>, JsonRejection>) -> Result<MovieInput, AppError> {
    let Json(input) = payload.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;
    input.validate().map_err(AppError::InvalidInput)?;
    Ok(input)
}

async fn resolve_director(state: &AppState, input: &MovieInput) -> Result<Option<i64>, AppError> {
    let Some(name) = &input.director else {
        return Ok(None);
    };
    let id = with_deadline(
        state.query_timeout,
        director::get_or_insert(&state.pool, &name.first_name, &name.last_name),
    )
    .await?;
    tracing::debug!(
        director.id = id,
        director.first_name = %name.first_name,
        director.last_name = %name.last_name,
        "resolved director"
    );
    Ok(Some(id))
}

async fn list_movies(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let movies = with_deadline(state.query_timeout, movie::list(&state.pool)).await?;
    Ok(Json(movies))
}

async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let found = with_deadline(state.query_timeout, movie::get_by_id(&state.pool, id))
        .await?
        .ok_or(AppError::NotFound("Movie"))?;
    Ok(Json(found))
}

async fn create_movie(
    State(state): State<AppState>,
    payload: Result<Json<MovieInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input = decode_body(payload)?;
    let director_id = resolve_director(&state, &input).await?;

    let id = with_deadline(
        state.query_timeout,
        movie::insert(&state.pool, &input, director_id),
    )
    .await?;
    tracing::info!(movie.id = id, title = %input.title, "movie created");

    Ok((StatusCode::CREATED, Json(input.into_movie(id, director_id))))
}

async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<MovieInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let input = decode_body(payload)?;
    let director_id = resolve_director(&state, &input).await?;

    let updated = with_deadline(
        state.query_timeout,
        movie::update(&state.pool, id, &input, director_id),
    )
    .await?;
    if updated == 0 {
        return Err(AppError::NotFound("Movie"));
    }
    tracing::info!(movie.id = id, "movie updated");

    Ok(Json(input.into_movie(id, director_id)))
}

async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let deleted = with_deadline(state.query_timeout, movie::delete(&state.pool, id)).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Movie"));
    }
    tracing::info!(movie.id = id, "movie deleted");

    Ok(Json(json!({
        "message": format!("Movie with ID {id} successfully deleted")
    })))
}
