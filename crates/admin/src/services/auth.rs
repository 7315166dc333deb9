//! Bearer-token verification against the remote auth service.
//!
//! The admin console never signs anyone up or in; clients obtain tokens
//! through the customer-facing service. This client only resolves tokens
//! so the role check can run against the profile document.

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, instrument};

use monngon_core::UserId;

use crate::config::AuthServiceConfig;

/// Errors from token verification.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Token missing, malformed, expired, or revoked.
    #[error("invalid token")]
    InvalidToken,

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

/// Verification-only client for the authentication service.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<AuthClientInner>,
}

struct AuthClientInner {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    token: &'a str,
}

#[derive(Deserialize)]
struct VerifiedToken {
    user_id: UserId,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    code: String,
    #[serde(default)]
    message: String,
}

impl AuthClient {
    /// Create a new auth service client.
    #[must_use]
    pub fn new(config: &AuthServiceConfig) -> Self {
        Self {
            inner: Arc::new(AuthClientInner {
                client: reqwest::Client::new(),
                base_url: format!("{}/v1", config.api_url.trim_end_matches('/')),
                api_key: config.api_key.expose_secret().to_string(),
            }),
        }
    }

    /// Resolve a bearer token to the identity it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for expired or revoked tokens,
    /// or a transport/parse error.
    #[instrument(skip(self, token))]
    pub async fn verify_token(&self, token: &str) -> Result<UserId, AuthError> {
        let url = format!("{}/verify", self.inner.base_url);
        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(&self.inner.api_key)
            .json(&TokenRequest { token })
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(map_api_error(status, &text));
        }

        let verified: VerifiedToken = serde_json::from_str(&text)?;
        Ok(verified.user_id)
    }
}

fn map_api_error(status: StatusCode, body: &str) -> AuthError {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return match parsed.error.code.as_str() {
            "INVALID_TOKEN" | "TOKEN_EXPIRED" => AuthError::InvalidToken,
            code => {
                error!(status = status.as_u16(), code, "auth service error");
                AuthError::Api {
                    status: status.as_u16(),
                    message: parsed.error.message,
                }
            }
        };
    }

    AuthError::Api {
        status: status.as_u16(),
        message: body.chars().take(200).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_token_maps_to_invalid() {
        let body = r#"{"error":{"code":"TOKEN_EXPIRED","message":""}}"#;
        assert!(matches!(
            map_api_error(StatusCode::UNAUTHORIZED, body),
            AuthError::InvalidToken
        ));
    }

    #[test]
    fn test_unknown_code_keeps_status_and_message() {
        let body = r#"{"error":{"code":"RATE_LIMITED","message":"try later"}}"#;
        match map_api_error(StatusCode::TOO_MANY_REQUESTS, body) {
            AuthError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "try later");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
