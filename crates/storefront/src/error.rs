//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding. All route handlers return `Result<T, AppError>`.
//!
//! The taxonomy follows what the screens actually show: login and validation
//! failures render inline with their exact messages; backend failures become
//! one generic banner with no further detail; checkout misuse keeps the user
//! where they are. Injected faults are not errors at all and never reach this
//! type.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use mango_stand_core::{AuthError, CheckoutError};

use crate::backend::BackendError;

/// Banner text for any backend failure. The end user gets no taxonomy.
const BACKEND_BANNER: &str = "Something went wrong. Please try again later.";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Simulated login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout flow misuse or shipping validation failure.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Hosted backend operation failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// No live session for a gated screen.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Backend(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Auth(_) | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Checkout(err) => match err {
                CheckoutError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
                CheckoutError::EmptyCart | CheckoutError::OutOfSequence { .. } => {
                    StatusCode::CONFLICT
                }
            },
            Self::Backend(err) => match err {
                BackendError::NotFound(_) => StatusCode::NOT_FOUND,
                BackendError::Fetch(_) | BackendError::Write(_) | BackendError::AuthRequired => {
                    StatusCode::BAD_GATEWAY
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            // Inline messages, word for word what the screens display.
            Self::Auth(err) => json!({ "error": err.to_string() }),
            Self::Checkout(CheckoutError::Invalid(errors)) => json!({
                "errors": errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
            }),
            Self::Checkout(err) => json!({ "error": err.to_string() }),
            // One generic banner; no backend detail leaks to the client.
            Self::Backend(BackendError::NotFound(_)) | Self::NotFound(_) => {
                json!({ "error": "Not found" })
            }
            Self::Backend(_) => json!({ "error": BACKEND_BANNER }),
            Self::Internal(_) => json!({ "error": "Internal server error" }),
            Self::Unauthorized(message) | Self::BadRequest(message) => {
                json!({ "error": message })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use mango_stand_core::ValidationError;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_auth_errors_are_unauthorized() {
        assert_eq!(status_of(AppError::Auth(AuthError::WrongSecret)), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(AppError::Auth(AuthError::AccountLocked)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_validation_is_unprocessable() {
        let err = AppError::Checkout(CheckoutError::Invalid(vec![ValidationError::MissingField(
            "Postal code",
        )]));
        assert_eq!(status_of(err), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_empty_cart_is_conflict() {
        assert_eq!(
            status_of(AppError::Checkout(CheckoutError::EmptyCart)),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_backend_failures_are_bad_gateway() {
        assert_eq!(
            status_of(AppError::Backend(BackendError::Fetch("boom".to_string()))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::Backend(BackendError::NotFound("p".to_string()))),
            StatusCode::NOT_FOUND
        );
    }
}
