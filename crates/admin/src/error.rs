//! Unified error handling for the admin console.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use monngon_core::InvalidTransition;
use monngon_store::StoreError;

use crate::services::{AssetError, AuthError};

/// Application-level error type for the admin console.
#[derive(Debug, Error)]
pub enum AppError {
    /// Document store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Token verification failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Asset host operation failed.
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Order status change rejected by the lifecycle graph.
    #[error("Invalid transition: {0}")]
    Transition(#[from] InvalidTransition),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Caller lacks the admin role.
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
    const fn is_server_error(&self) -> bool {
        match self {
            Self::Internal(_) | Self::Asset(_) => true,
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
                AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
                AuthError::Http(_) | AuthError::Api { .. } | AuthError::Parse(_) => {
                    StatusCode::BAD_GATEWAY
                }
            },
            Self::Asset(_) => StatusCode::BAD_GATEWAY,
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
                _ => "Storage service error".to_string(),
            },
            Self::Auth(err) => match err {
                AuthError::InvalidToken => "Session expired, please sign in again".to_string(),
                AuthError::Http(_) | AuthError::Api { .. } | AuthError::Parse(_) => {
                    "Authentication service error".to_string()
                }
            },
            Self::Asset(_) => "Image upload failed".to_string(),
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
                "Admin request error"
            );
        }

        let status = self.status_code();
        let body = Json(json!({ "error": self.client_message() }));
        (status, body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from an admin user ID.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("orders/o-1".to_string());
        assert_eq!(err.to_string(), "Not found: orders/o-1");
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
            get_status(AppError::Auth(AuthError::InvalidToken)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_asset_failure_is_bad_gateway_with_redacted_message() {
        let err = AppError::Asset(AssetError::Api {
            status: 500,
            message: "disk full on host-17".to_string(),
        });
        assert_eq!(err.client_message(), "Image upload failed");
        assert_eq!(get_status(err), StatusCode::BAD_GATEWAY);
    }
}
