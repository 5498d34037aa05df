use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Director {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// Director as submitted by a client. Any `id` in the body is ignored: the
/// director is always resolved by name.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectorName {
    pub first_name: String,
    pub last_name: String,
}

/// Returns the id of the director with this exact name, inserting it first if
/// needed. This is a single statement against the `(first_name, last_name)`
/// unique constraint, so concurrent callers always converge on one row.
pub async fn get_or_insert(
    pool: &SqlitePool,
    first_name: &str,
    last_name: &str,
) -> Result<i64, sqlx::Error> {
    // The no-op DO UPDATE makes RETURNING yield the existing row on conflict.
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO directors (first_name, last_name)
         VALUES (?, ?)
         ON CONFLICT(first_name, last_name) DO UPDATE SET
           first_name = excluded.first_name
         RETURNING id",
    )
    .bind(first_name)
    .bind(last_name)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Director>, sqlx::Error> {
    sqlx::query_as::<_, Director>("SELECT id, first_name, last_name FROM directors WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM directors")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}
