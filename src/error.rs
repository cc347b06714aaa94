//! Error types for Shelfmark server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable numeric error codes returned in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchData = 4,
    NoSuchCopy = 5,
    NoSuchCheckout = 6,
    NoSuchFollowUp = 7,
    CopyUnavailable = 8,
    FollowUpExists = 9,
    Conflict = 10,
    BadValue = 11,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Entity absent or owned by someone else. Both cases look the same.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Book copy not found")]
    CopyNotFound,

    #[error("Book copy is not available")]
    CopyUnavailable,

    #[error("Active checkout not found")]
    CheckoutNotFound,

    #[error("Follow-up not found")]
    FollowUpNotFound,

    #[error("Follow-up already exists for this checkout")]
    FollowUpAlreadyExists,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    /// HTTP status, error code and client-facing message.
    ///
    /// Store and internal failures never expose their detail to the caller.
    fn parts(&self) -> (StatusCode, ErrorCode, String) {
        match self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg.clone()),
            AppError::CopyNotFound => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchCopy, self.to_string())
            }
            AppError::CheckoutNotFound => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchCheckout, self.to_string())
            }
            AppError::FollowUpNotFound => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchFollowUp, self.to_string())
            }
            AppError::CopyUnavailable => {
                (StatusCode::BAD_REQUEST, ErrorCode::CopyUnavailable, self.to_string())
            }
            AppError::FollowUpAlreadyExists => {
                (StatusCode::BAD_REQUEST, ErrorCode::FollowUpExists, self.to_string())
            }
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, ErrorCode::Conflict, msg.clone()),
            AppError::Validation(msg) | AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::DbFailure,
                "Database error".to_string(),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::Failure,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => tracing::error!(error = ?e, "Database error"),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::CopyUnavailable | AppError::FollowUpAlreadyExists | AppError::Conflict(_) => {
                tracing::warn!("Request rejected: {}", self)
            }
            _ => {}
        }

        let (status, code, message) = self.parts();

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

/// Whether a store error is a unique-constraint violation on `constraint`.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.is_unique_violation() && db.constraint() == Some(constraint)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_variants_map_to_404() {
        for err in [
            AppError::CopyNotFound,
            AppError::CheckoutNotFound,
            AppError::FollowUpNotFound,
            AppError::NotFound("Book not found".to_string()),
        ] {
            assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn test_conflicts_are_400_with_distinct_codes() {
        let (status, code, _) = AppError::CopyUnavailable.parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, ErrorCode::CopyUnavailable);

        let (status, code, _) = AppError::FollowUpAlreadyExists.parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, ErrorCode::FollowUpExists);
    }

    #[test]
    fn test_internal_detail_is_not_exposed() {
        let (status, _, message) =
            AppError::Internal("connection reset by peer at 10.0.0.3".to_string()).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error");

        let (_, code, message) = AppError::Database(sqlx::Error::PoolTimedOut).parts();
        assert_eq!(code, ErrorCode::DbFailure);
        assert_eq!(message, "Database error");
    }

    #[test]
    fn test_missing_identity_is_401() {
        let response = AppError::Authentication("Authentication required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
