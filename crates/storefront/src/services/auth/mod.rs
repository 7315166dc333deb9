//! Client for the remote authentication service.
//!
//! Identity is owned by an external service: it stores credentials, issues
//! bearer tokens, and sends password-reset emails. This module wraps its
//! JSON/REST interface. Profile data lives in the document store's `users`
//! collection, keyed by the user id the auth service assigns.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};

use monngon_core::UserId;

use crate::config::AuthServiceConfig;

/// Client for the authentication service.
///
/// Cheaply cloneable; all clones share one HTTP connection pool.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<AuthClientInner>,
}

struct AuthClientInner {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// An issued session: the identity plus its bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub user_id: UserId,
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

/// Result of verifying a bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifiedToken {
    pub user_id: UserId,
}

#[derive(Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    token: &'a str,
}

#[derive(Serialize)]
struct EmailRequest<'a> {
    email: &'a str,
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

    /// Register a new account and return its first session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailTaken`] or [`AuthError::WeakPassword`] when
    /// the service rejects the registration, or a transport/parse error.
    #[instrument(skip(self, password))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        self.execute("signup", &CredentialsRequest { email, password })
            .await
    }

    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on a wrong password or
    /// unknown email, or a transport/parse error.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        self.execute("signin", &CredentialsRequest { email, password })
            .await
    }

    /// Resolve a bearer token to the identity it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for expired or revoked tokens,
    /// or a transport/parse error.
    #[instrument(skip(self, token))]
    pub async fn verify_token(&self, token: &str) -> Result<UserId, AuthError> {
        let verified: VerifiedToken = self.execute("verify", &TokenRequest { token }).await?;
        Ok(verified.user_id)
    }

    /// Revoke a token.
    ///
    /// # Errors
    ///
    /// Returns a transport error, or [`AuthError::InvalidToken`] if the
    /// token was already invalid.
    #[instrument(skip(self, token))]
    pub async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        let _: serde_json::Value = self.execute("signout", &TokenRequest { token }).await?;
        Ok(())
    }

    /// Ask the auth service to email a password-reset link.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserNotFound`] for unknown emails, or a
    /// transport error.
    #[instrument(skip(self))]
    pub async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let _: serde_json::Value = self
            .execute("password-reset", &EmailRequest { email })
            .await?;
        Ok(())
    }

    /// POST a JSON request and decode the JSON response, mapping the
    /// service's error codes onto [`AuthError`].
    async fn execute<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AuthError> {
        let url = format!("{}/{path}", self.inner.base_url);
        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(&self.inner.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(map_api_error(status, &text));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Map a non-success response to the matching error variant.
///
/// The service reports failures as `{"error": {"code", "message"}}`;
/// anything it does not name gets the generic `Api` variant.
fn map_api_error(status: StatusCode, body: &str) -> AuthError {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return match parsed.error.code.as_str() {
            "EMAIL_EXISTS" => AuthError::EmailTaken,
            "INVALID_CREDENTIALS" => AuthError::InvalidCredentials,
            "INVALID_TOKEN" | "TOKEN_EXPIRED" => AuthError::InvalidToken,
            "WEAK_PASSWORD" => AuthError::WeakPassword(parsed.error.message),
            "USER_NOT_FOUND" => AuthError::UserNotFound,
            code => {
                error!(status = status.as_u16(), code, "auth service error");
                AuthError::Api {
                    status: status.as_u16(),
                    message: parsed.error.message,
                }
            }
        };
    }

    error!(
        status = status.as_u16(),
        body = %body.chars().take(200).collect::<String>(),
        "auth service returned unparseable error"
    );
    AuthError::Api {
        status: status.as_u16(),
        message: body.chars().take(200).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_known_error_codes() {
        let body = r#"{"error":{"code":"EMAIL_EXISTS","message":"taken"}}"#;
        assert!(matches!(
            map_api_error(StatusCode::CONFLICT, body),
            AuthError::EmailTaken
        ));

        let body = r#"{"error":{"code":"TOKEN_EXPIRED","message":""}}"#;
        assert!(matches!(
            map_api_error(StatusCode::UNAUTHORIZED, body),
            AuthError::InvalidToken
        ));

        let body = r#"{"error":{"code":"WEAK_PASSWORD","message":"too short"}}"#;
        match map_api_error(StatusCode::BAD_REQUEST, body) {
            AuthError::WeakPassword(msg) => assert_eq!(msg, "too short"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_map_unknown_error_code() {
        let body = r#"{"error":{"code":"QUOTA_EXCEEDED","message":"slow down"}}"#;
        match map_api_error(StatusCode::TOO_MANY_REQUESTS, body) {
            AuthError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "slow down");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_map_unparseable_error_body() {
        match map_api_error(StatusCode::BAD_GATEWAY, "<html>upstream down</html>") {
            AuthError::Api { status, message } => {
                assert_eq!(status, 502);
                assert!(message.contains("upstream down"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_session_decodes() {
        let session: AuthSession =
            serde_json::from_str(r#"{"user_id":"u-1","token":"tok","expires_in":3600}"#)
                .expect("session");
        assert_eq!(session.user_id.as_str(), "u-1");
        assert_eq!(session.expires_in, 3600);
    }
}
