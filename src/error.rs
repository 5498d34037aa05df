use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::time::Duration;

#[derive(Debug)]
pub enum AppError {
    Database(sqlx::Error),
    Timeout(Duration),
    NotFound(&'static str),
    InvalidInput(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Database(e) => write!(f, "Database error: {e}"),
            AppError::Timeout(limit) => {
                write!(f, "Data access exceeded deadline of {}ms", limit.as_millis())
            }
            AppError::NotFound(what) => write!(f, "{what} not found"),
            AppError::InvalidInput(reason) => write!(f, "Invalid input: {reason}"),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Timeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message sent to the client. Server-side faults never expose their cause.
    fn public_message(&self) -> String {
        match self {
            AppError::Database(_) | AppError::Timeout(_) => "Internal server error".to_string(),
            AppError::NotFound(what) => format!("{what} not found"),
            AppError::InvalidInput(_) => "Invalid input".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = match &self {
            AppError::Database(_) => "database",
            AppError::Timeout(_) => "timeout",
            AppError::NotFound(_) => "not_found",
            AppError::InvalidInput(_) => "invalid_input",
        };
        if status.is_server_error() {
            tracing::error!(
                error.kind = kind,
                error.message = %self,
                status = status.as_u16(),
                "request error"
            );
        } else {
            tracing::warn!(
                error.kind = kind,
                error.message = %self,
                status = status.as_u16(),
                "request rejected"
            );
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Database(e)
    }
}
