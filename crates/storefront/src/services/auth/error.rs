//! Authentication error types.

use thiserror::Error;

/// Errors that can occur talking to the remote authentication service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// An account with this email already exists.
    #[error("email already registered")]
    EmailTaken,

    /// Invalid credentials (wrong password or unknown email).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Token missing, malformed, expired, or revoked.
    #[error("invalid token")]
    InvalidToken,

    /// Password rejected by the auth service's policy.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// No account for this email.
    #[error("user not found")]
    UserNotFound,

    /// HTTP transport failure.
    #[error("auth request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Auth service returned an unexpected error response.
    #[error("auth service error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("failed to parse auth response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(AuthError::EmailTaken.to_string(), "email already registered");
        assert_eq!(
            AuthError::Api {
                status: 503,
                message: "maintenance".to_string()
            }
            .to_string(),
            "auth service error (503): maintenance"
        );
    }
}
