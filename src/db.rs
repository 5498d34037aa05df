use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use crate::config::AppConfig;
use crate::error::AppError;

pub async fn init_pool(config: &AppConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.query_timeout())
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Applies the schema. Every statement is `IF NOT EXISTS`, so this is safe to
/// run against an already provisioned database.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(include_str!("../migrations/001_initial.sql"))
        .execute(pool)
        .await?;
    Ok(())
}

/// Runs a data-access future under the request deadline.
pub async fn with_deadline<T, F>(limit: Duration, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(AppError::from),
        Err(_) => Err(AppError::Timeout(limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn deadline_expiry_is_a_timeout() {
        let result = with_deadline(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok::<_, sqlx::Error>(())
        })
        .await;
        assert!(matches!(result, Err(AppError::Timeout(_))));
    }

    #[tokio::test]
    async fn database_errors_pass_through() {
        let result: Result<(), AppError> = with_deadline(Duration::from_secs(1), async {
            Err(sqlx::Error::RowNotFound)
        })
        .await;
        assert!(matches!(result, Err(AppError::Database(sqlx::Error::RowNotFound))));
    }

    #[tokio::test]
    async fn schema_is_idempotent() {
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            listen_addr: "127.0.0.1:0".to_string(),
            max_connections: 1,
            query_timeout_ms: 1000,
        };
        let pool = init_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
    }
}
