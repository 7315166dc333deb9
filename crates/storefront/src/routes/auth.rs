//! Authentication routes.
//!
//! Credentials live in the remote auth service; the store's `users`
//! collection holds the profile document keyed by the auth user id.
//! Registration does both: sign up, then write the profile.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, request::Parts},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use monngon_core::{AccountStatus, Email, Phone, UserId, UserRole};
use monngon_store::documents::NewProfile;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::bearer_token;
use crate::services::auth::AuthError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user_id: UserId,
    pub token: String,
    pub expires_in: u64,
    pub role: UserRole,
}

/// POST /auth/register - create the account and its profile document.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    let email = Email::parse(&request.email)
        .map_err(|e| AppError::Validation(format!("invalid email: {e}")))?;
    let phone = match request.phone {
        Some(raw) => Some(
            Phone::parse(&raw)
                .map_err(|e| AppError::Validation(format!("invalid phone: {e}")))?
                .into_inner(),
        ),
        None => None,
    };

    let session = state
        .auth()
        .sign_up(email.as_str(), &request.password)
        .await?;

    let profile = NewProfile {
        name: request.name.trim().to_string(),
        email: email.into_inner(),
        phone,
        address: request.address,
        role: UserRole::User,
        status: AccountStatus::Active,
        created_at: Utc::now(),
    };
    state
        .store()
        .create_profile(&session.user_id, &profile)
        .await?;

    info!(user_id = %session.user_id, "account registered");
    set_sentry_user(&session.user_id, Some(&profile.email));

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            user_id: session.user_id,
            token: session.token,
            expires_in: session.expires_in,
            role: UserRole::User,
        }),
    ))
}

/// POST /auth/login - exchange credentials for a bearer token.
///
/// Blocked accounts get a token from the auth service but are turned away
/// here, before the client ever holds a usable session.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    let session = state
        .auth()
        .sign_in(&request.email, &request.password)
        .await?;

    let profile = state
        .store()
        .get_profile(&session.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("no profile for this account".to_string()))?;
    if profile.status == AccountStatus::Blocked {
        return Err(AppError::Forbidden("This account has been blocked".to_string()));
    }

    set_sentry_user(&session.user_id, Some(profile.email.as_str()));

    Ok(Json(SessionResponse {
        user_id: session.user_id,
        token: session.token,
        expires_in: session.expires_in,
        role: profile.role,
    }))
}

/// POST /auth/logout - revoke the caller's token.
pub async fn logout(State(state): State<AppState>, parts: Parts) -> Result<StatusCode> {
    let token = bearer_token(&parts)
        .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;

    state.auth().sign_out(token).await?;
    clear_sentry_user();
    Ok(StatusCode::NO_CONTENT)
}

/// POST /auth/password-reset - ask the auth service to send a reset email.
///
/// Always responds 204; unknown emails are not revealed to the caller.
pub async fn password_reset(
    State(state): State<AppState>,
    Json(request): Json<PasswordResetRequest>,
) -> Result<StatusCode> {
    match state.auth().send_password_reset(&request.email).await {
        Ok(()) | Err(AuthError::UserNotFound) => Ok(StatusCode::NO_CONTENT),
        Err(err) => Err(err.into()),
    }
}
