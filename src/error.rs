//! Error types for the library backend

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable error codes carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    DbFailure = 2,
    NoSuchBook = 3,
    NoSuchStudent = 4,
    BookAlreadyIssued = 5,
    BookNotIssued = 6,
    BadValue = 7,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Book {0} not found")]
    BookNotFound(i64),

    #[error("Student {0} not found")]
    StudentNotFound(i64),

    #[error("Book {0} is already issued")]
    AlreadyIssued(i64),

    #[error("Book {0} is not issued")]
    NotIssued(i64),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BookNotFound(_) | AppError::StudentNotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyIssued(_) | AppError::NotIssued(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::BookNotFound(_) => ErrorCode::NoSuchBook,
            AppError::StudentNotFound(_) => ErrorCode::NoSuchStudent,
            AppError::AlreadyIssued(_) => ErrorCode::BookAlreadyIssued,
            AppError::NotIssued(_) => ErrorCode::BookNotIssued,
            AppError::BadRequest(_) => ErrorCode::BadValue,
            AppError::Database(_) => ErrorCode::DbFailure,
            AppError::Internal(_) => ErrorCode::Failure,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        // Store failures are logged in full but never echoed to the client.
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::BookNotFound(9999).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::StudentNotFound(1).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_noop_transitions_map_to_conflict() {
        assert_eq!(AppError::AlreadyIssued(1).status(), StatusCode::CONFLICT);
        assert_eq!(AppError::NotIssued(1).status(), StatusCode::CONFLICT);
        assert_ne!(AppError::AlreadyIssued(1).code(), AppError::NotIssued(1).code());
    }

    #[test]
    fn test_store_failures_are_internal() {
        let response = AppError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let error = AppError::Internal("lock poisoned".to_string());
        assert_eq!(error.code(), ErrorCode::Failure);
    }

    #[tokio::test]
    async fn test_body_hides_database_detail() {
        let response = AppError::Database(sqlx::Error::PoolTimedOut).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], 2);
        assert_eq!(body["error"], "DbFailure");
        assert_eq!(body["message"], "Database error");
    }

    #[test]
    fn test_bad_request_maps_to_bad_value() {
        let error = AppError::BadRequest("expected a number".to_string());
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.code(), ErrorCode::BadValue);
        assert_eq!(error.code() as u32, 7);
    }
}
