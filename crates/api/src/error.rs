//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`; failure bodies are JSON `{"message": ...}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::{CheckoutError, RepositoryError};

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Order placement failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error is a server fault worth reporting upstream.
    const fn is_server_error(&self) -> bool {
        match self {
            Self::Database(RepositoryError::NotFound | RepositoryError::Conflict(_))
            | Self::Checkout(
                CheckoutError::PlantNotFound { .. }
                | CheckoutError::InsufficientStock { .. }
                | CheckoutError::Invalid(_),
            )
            | Self::NotFound(_)
            | Self::BadRequest(_) => false,
            Self::Database(_) | Self::Checkout(CheckoutError::Database(_)) | Self::Internal(_) => {
                true
            }
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Database(RepositoryError::NotFound)
            | Self::Checkout(CheckoutError::PlantNotFound { .. })
            | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Checkout(CheckoutError::Database(_)) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Checkout(CheckoutError::InsufficientStock { .. } | CheckoutError::Invalid(_))
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing message.
    ///
    /// Storage failures echo the underlying error message to the caller,
    /// matching the behavior of the service this replaces.
    fn message(&self) -> String {
        match self {
            Self::Database(err) => err.to_string(),
            Self::Checkout(err) => err.to_string(),
            Self::NotFound(msg) | Self::BadRequest(msg) | Self::Internal(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status_code();
        let body = Json(serde_json::json!({ "message": self.message() }));

        (status, body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Plant not found".to_string());
        assert_eq!(err.to_string(), "Not found: Plant not found");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            status_of(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_checkout_error_status_codes() {
        assert_eq!(
            status_of(AppError::Checkout(CheckoutError::PlantNotFound {
                name: "Monstera".to_string()
            })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Checkout(CheckoutError::InsufficientStock {
                name: "Monstera".to_string()
            })),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_checkout_error_messages_use_plant_name() {
        let err = AppError::Checkout(CheckoutError::PlantNotFound {
            name: "Snake Plant".to_string(),
        });
        assert!(err.message().contains("Snake Plant"));
    }
}
