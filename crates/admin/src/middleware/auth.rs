//! Admin authentication extractor.
//!
//! Every console route receives the caller via [`RequireAdmin`]: the bearer
//! token is verified against the auth service, the profile is loaded from
//! the store, and anything without the admin role is turned away.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use monngon_core::{AccountStatus, UserId, UserRole};

use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

/// The authenticated admin.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: UserId,
}

/// Extractor that requires a bearer token resolving to an active admin
/// profile.
///
/// # Example
///
/// ```rust,ignore
/// async fn console_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("admin {}", admin.id)
/// }
/// ```
pub struct RequireAdmin(pub AdminUser);

impl FromRequestParts<AppState> for RequireAdmin {
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
        if profile.role != UserRole::Admin {
            return Err(AppError::Forbidden("Admin role required".to_string()));
        }

        set_sentry_user(&user_id, Some(profile.email.as_str()));

        Ok(Self(AdminUser { id: user_id }))
    }
}

/// Pull the bearer token out of the `Authorization` header, if present.
fn bearer_token(parts: &Parts) -> Option<&str> {
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

    #[test]
    fn test_bearer_token_extraction() {
        let (parts, ()) = Request::builder()
            .uri("/orders")
            .header(header::AUTHORIZATION, "Bearer tok-1")
            .body(())
            .expect("request")
            .into_parts();
        assert_eq!(bearer_token(&parts), Some("tok-1"));
    }
}
