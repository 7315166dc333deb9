//! Role management commands.
//!
//! Accounts sign up through the storefront; the first admin (and any later
//! one) is promoted here by email.
//!
//! # Usage
//!
//! ```bash
//! monngon-cli admin grant -e admin@example.com
//! monngon-cli admin revoke -e admin@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `STORE_API_URL` - Document store base URL
//! - `STORE_PROJECT` - Document store project identifier
//! - `STORE_API_KEY` - Document store API key

use thiserror::Error;
use tracing::info;

use monngon_core::{Email, UserRole};
use monngon_store::StoreError;

use super::MissingEnvVar;

/// Errors that can occur during role management.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Env(#[from] MissingEnvVar),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("No account found for email: {0}")]
    UserNotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Grant the admin role to the account registered under `email`.
pub async fn grant(email: &str) -> Result<(), AdminError> {
    set_role(email, UserRole::Admin).await
}

/// Demote the account registered under `email` back to a regular user.
pub async fn revoke(email: &str) -> Result<(), AdminError> {
    set_role(email, UserRole::User).await
}

async fn set_role(email: &str, role: UserRole) -> Result<(), AdminError> {
    dotenvy::dotenv().ok();

    let email = Email::parse(email).map_err(|_| AdminError::InvalidEmail(email.to_owned()))?;
    let store = super::store_client_from_env()?;

    let profile = store
        .find_profile_by_email(email.as_str())
        .await?
        .ok_or_else(|| AdminError::UserNotFound(email.as_str().to_owned()))?;

    if profile.role == role {
        info!(email = %email.as_str(), ?role, "Account already has this role");
        return Ok(());
    }

    store.set_role(&profile.id, role).await?;
    info!(
        email = %email.as_str(),
        user_id = %profile.id,
        ?role,
        "Role updated"
    );

    Ok(())
}
