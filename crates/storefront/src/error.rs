//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers return `Result<T, AppError>`
//! and failures surface as a JSON body `{"error": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use monngon_core::InvalidTransition;
use monngon_store::StoreError;

use crate::services::auth::AuthError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Document store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Auth service operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Order status change rejected by the lifecycle graph.
    #[error("Invalid transition: {0}")]
    Transition(#[from] InvalidTransition),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request was well-formed but semantically invalid.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error indicates a server-side failure worth reporting.
    const fn is_server_error(&self) -> bool {
        match self {
            Self::Internal(_) => true,
            Self::Store(err) => !matches!(err, StoreError::NotFound(_)),
            Self::Auth(err) => matches!(
                err,
                AuthError::Http(_) | AuthError::Api { .. } | AuthError::Parse(_)
            ),
            _ => false,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Store(err) => match err {
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::CommitRejected(_) => StatusCode::CONFLICT,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Auth(err) => match err {
                AuthError::EmailTaken => StatusCode::CONFLICT,
                AuthError::InvalidCredentials | AuthError::InvalidToken => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
                AuthError::UserNotFound => StatusCode::NOT_FOUND,
                AuthError::Http(_) | AuthError::Api { .. } | AuthError::Parse(_) => {
                    StatusCode::BAD_GATEWAY
                }
            },
            Self::Transition(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Upstream failure details stay server-side.
    fn client_message(&self) -> String {
        match self {
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Store(err) => match err {
                StoreError::NotFound(_) => "Not found".to_string(),
                StoreError::CommitRejected(_) => {
                    "The order could not be placed, please try again".to_string()
                }
                _ => "Storage service error".to_string(),
            },
            Self::Auth(err) => match err {
                AuthError::EmailTaken => "An account with this email already exists".to_string(),
                AuthError::InvalidCredentials => "Invalid email or password".to_string(),
                AuthError::InvalidToken => "Session expired, please sign in again".to_string(),
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::UserNotFound => "No account with this email".to_string(),
                AuthError::Http(_) | AuthError::Api { .. } | AuthError::Parse(_) => {
                    "Authentication service error".to_string()
                }
            },
            Self::Transition(err) => err.to_string(),
            Self::NotFound(what) => format!("Not found: {what}"),
            Self::Unauthorized(_) => "Authentication required".to_string(),
            Self::Forbidden(msg) => msg.clone(),
            Self::BadRequest(msg) | Self::Validation(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side failures to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status_code();
        let body = Json(json!({ "error": self.client_message() }));
        (status, body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use monngon_core::OrderStatus;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("foods/abc".to_string());
        assert_eq!(err.to_string(), "Not found: foods/abc");

        let err = AppError::Validation("quantity must be at least 1".to_string());
        assert_eq!(err.to_string(), "Validation failed: quantity must be at least 1");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Forbidden("test".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Validation("test".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_rejected_transition_maps_to_conflict() {
        let err = OrderStatus::Delivered
            .transition(OrderStatus::Cancelled)
            .expect_err("terminal");
        assert_eq!(get_status(AppError::Transition(err)), StatusCode::CONFLICT);
    }

    #[test]
    fn test_store_not_found_maps_to_not_found() {
        let err = AppError::Store(StoreError::NotFound("orders/x".to_string()));
        assert_eq!(get_status(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_upstream_details_are_redacted() {
        let err = AppError::Store(StoreError::Api {
            status: 500,
            message: "internal table scan failed".to_string(),
        });
        assert_eq!(err.client_message(), "Storage service error");
    }
}
