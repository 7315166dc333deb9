//! User administration: profile listing, block and unblock.
//!
//! Blocking takes effect at the next token verification; issued tokens are
//! not revoked here.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use monngon_core::{AccountStatus, UserId};
use monngon_store::documents::Profile;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// GET /users - every profile, newest first.
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Profile>>> {
    Ok(Json(state.store().list_profiles().await?))
}

/// POST /users/{id}/block
pub async fn block(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<UserId>,
) -> Result<StatusCode> {
    set_status(&state, &admin.id, &id, AccountStatus::Blocked).await
}

/// POST /users/{id}/unblock
pub async fn unblock(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<UserId>,
) -> Result<StatusCode> {
    set_status(&state, &admin.id, &id, AccountStatus::Active).await
}

async fn set_status(
    state: &AppState,
    admin: &UserId,
    id: &UserId,
    status: AccountStatus,
) -> Result<StatusCode> {
    if state.store().get_profile(id).await?.is_none() {
        return Err(AppError::NotFound(format!("users/{id}")));
    }

    state.store().set_account_status(id, status).await?;
    info!(user_id = %id, ?status, admin = %admin, "account status changed");
    Ok(StatusCode::NO_CONTENT)
}
