use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::models::director::{Director, DirectorName};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub poster: String,
    pub director: Option<Director>,
}

/// Request body for create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub release_year: i32,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub director: Option<DirectorName>,
}

impl MovieInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title must not be empty".to_string());
        }
        if let Some(director) = &self.director {
            if director.first_name.trim().is_empty() || director.last_name.trim().is_empty() {
                return Err("director first_name and last_name must not be empty".to_string());
            }
        }
        Ok(())
    }

    pub fn into_movie(self, id: i64, director_id: Option<i64>) -> Movie {
        let director = match (self.director, director_id) {
            (Some(name), Some(director_id)) => Some(Director {
                id: director_id,
                first_name: name.first_name,
                last_name: name.last_name,
            }),
            _ => None,
        };
        Movie {
            id,
            title: self.title,
            description: self.description,
            release_year: self.release_year,
            poster: self.poster,
            director,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MovieRow {
    id: i64,
    title: String,
    description: String,
    release_year: i32,
    poster: String,
    director_id: Option<i64>,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        let director = match (row.director_id, row.first_name, row.last_name) {
            (Some(id), Some(first_name), Some(last_name)) => Some(Director {
                id,
                first_name,
                last_name,
            }),
            _ => None,
        };
        Movie {
            id: row.id,
            title: row.title,
            description: row.description,
            release_year: row.release_year,
            poster: row.poster,
            director,
        }
    }
}

const SELECT_MOVIES: &str = "SELECT m.id, m.title, m.description, m.release_year, m.poster,
            d.id AS director_id, d.first_name, d.last_name
     FROM movies m
     LEFT JOIN directors d ON m.director_id = d.id";

/// All movies in table scan order.
pub async fn list(pool: &SqlitePool) -> Result<Vec<Movie>, sqlx::Error> {
    let rows = sqlx::query_as::<_, MovieRow>(SELECT_MOVIES)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Movie::from).collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Movie>, sqlx::Error> {
    let query = format!("{SELECT_MOVIES} WHERE m.id = ?");
    let row = sqlx::query_as::<_, MovieRow>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Movie::from))
}

pub async fn insert(
    pool: &SqlitePool,
    input: &MovieInput,
    director_id: Option<i64>,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO movies (title, description, release_year, poster, director_id)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.release_year)
    .bind(&input.poster)
    .bind(director_id)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Returns the number of rows updated (0 when `id` does not exist).
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    input: &MovieInput,
    director_id: Option<i64>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE movies
         SET title = ?, description = ?, release_year = ?, poster = ?, director_id = ?
         WHERE id = ?",
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.release_year)
    .bind(&input.poster)
    .bind(director_id)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Deletes the movie row only; its director is kept since others may share it.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM movies WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM movies")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}
