//! Authentication extractors.
//!
//! Every protected route receives the caller via [`RequireUser`]: the bearer
//! token is verified against the auth service, the profile is loaded from
//! the store, and blocked accounts are rejected before the handler runs.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use monngon_core::{AccountStatus, UserId, UserRole};

use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub role: UserRole,
}

/// Extractor that requires an authenticated, non-blocked account.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireUser(user): RequireUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.id)
/// }
/// ```
pub struct RequireUser(pub CurrentUser);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;

        let user_id = state.auth().verify_token(token).await?;

        let profile = state
            .store()
            .get_profile(&user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("no profile for this account".to_string()))?;

        if profile.status == AccountStatus::Blocked {
            return Err(AppError::Forbidden("This account has been blocked".to_string()));
        }

        set_sentry_user(&user_id, Some(profile.email.as_str()));

        Ok(Self(CurrentUser {
            id: user_id,
            role: profile.role,
        }))
    }
}

/// Pull the bearer token out of the `Authorization` header, if present.
#[must_use]
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/orders");
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let (parts, ()) = builder.body(()).expect("request").into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_present() {
        let parts = parts_with_auth(Some("Bearer abc123"));
        assert_eq!(bearer_token(&parts), Some("abc123"));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let parts = parts_with_auth(None);
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let parts = parts_with_auth(Some("Basic dXNlcjpwdw=="));
        assert_eq!(bearer_token(&parts), None);
    }
}
