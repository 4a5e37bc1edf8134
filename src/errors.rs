use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::response::ApiResponse;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Postgres(#[from] sqlx::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("database connection lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Whether the store rejected the submitted data rather than failing on its own.
    pub fn is_client_error(&self) -> bool {
        match self {
            StoreError::Postgres(sqlx::Error::Database(db)) => {
                // SQLSTATE classes 22 (data exception) and 23 (integrity constraint violation)
                let code = db.code();
                matches!(code.as_deref().and_then(|c| c.get(..2)), Some("22" | "23"))
            }
            StoreError::Sqlite(rusqlite::Error::SqliteFailure(err, _)) => matches!(
                err.code,
                rusqlite::ErrorCode::ConstraintViolation | rusqlite::ErrorCode::TooBig
            ),
            _ => false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    NotFound(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Store(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::Store(e) => {
                if status.is_server_error() {
                    tracing::error!("store error: {e}");
                } else {
                    tracing::warn!("store rejected request: {e}");
                }
                ApiResponse::<()>::error(e.to_string())
            }
            AppError::NotFound(msg) => ApiResponse::<()>::failure_message(msg.clone()),
        };

        (status, Json(body)).into_response()
    }
}
