//! Account routes: profile, addresses, payment methods, vouchers, favorites.
//!
//! All routes require authentication. Records are scoped to the caller;
//! anything owned by someone else reads as not-found.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};

use monngon_core::{AddressId, FoodId, PaymentLabel, PaymentMethodId, Phone, VoucherId};
use monngon_store::documents::{
    Address, Favorite, NewAddress, NewFavorite, NewPaymentMethod, NewVoucher, PaymentMethod,
    Profile, ProfilePatch, Voucher,
};

use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::state::AppState;

// =============================================================================
// Profile
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// GET /account/profile
pub async fn profile(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Profile>> {
    let profile = state
        .store()
        .get_profile(&user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("users/{}", user.id)))?;
    Ok(Json(profile))
}

/// PATCH /account/profile - edit the owner-editable fields.
pub async fn update_profile(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<ProfileUpdateRequest>,
) -> Result<StatusCode> {
    if let Some(name) = &request.name
        && name.trim().is_empty()
    {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    let phone = match request.phone {
        Some(raw) => Some(
            Phone::parse(&raw)
                .map_err(|e| AppError::Validation(format!("invalid phone: {e}")))?
                .into_inner(),
        ),
        None => None,
    };

    let patch = ProfilePatch {
        name: request.name.map(|n| n.trim().to_string()),
        phone,
        address: request.address,
    };
    state.store().update_profile(&user.id, &patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Addresses
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateAddressRequest {
    #[serde(default)]
    pub label: String,
    pub recipient_name: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub is_default: bool,
}

/// GET /account/addresses
pub async fn addresses(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Address>>> {
    Ok(Json(state.store().addresses_for(&user.id).await?))
}

/// POST /account/addresses
pub async fn create_address(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CreateAddressRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    if request.address.trim().is_empty() {
        return Err(AppError::Validation("address must not be empty".to_string()));
    }
    if request.recipient_name.trim().is_empty() {
        return Err(AppError::Validation(
            "recipient name must not be empty".to_string(),
        ));
    }
    let phone = Phone::parse(&request.phone)
        .map_err(|e| AppError::Validation(format!("invalid phone: {e}")))?;

    let new_address = NewAddress {
        owner_id: user.id.clone(),
        label: request.label,
        recipient_name: request.recipient_name.trim().to_string(),
        phone: phone.into_inner(),
        address: request.address.trim().to_string(),
        is_default: false,
    };
    let id = state.store().add_address(&new_address).await?;

    // The default flag only ever flips inside the transactional toggle, so
    // the at-most-one-default invariant has a single writer.
    if request.is_default {
        state.store().set_default_address(&user.id, &id).await?;
    }

    Ok((StatusCode::CREATED, Json(json!({ "address_id": id }))))
}

/// DELETE /account/addresses/{id}
pub async fn delete_address(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<AddressId>,
) -> Result<StatusCode> {
    let owned = state
        .store()
        .get_address(&id)
        .await?
        .is_some_and(|address| address.owner_id == user.id);
    if !owned {
        return Err(AppError::NotFound(format!("addresses/{id}")));
    }

    state.store().delete_address(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /account/addresses/{id}/default - make this the only default.
pub async fn set_default_address(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<AddressId>,
) -> Result<StatusCode> {
    state.store().set_default_address(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Payment methods
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreatePaymentMethodRequest {
    pub label: PaymentLabel,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub is_default: bool,
}

/// GET /account/payment-methods
pub async fn payment_methods(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<PaymentMethod>>> {
    Ok(Json(state.store().payment_methods_for(&user.id).await?))
}

/// POST /account/payment-methods
pub async fn create_payment_method(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CreatePaymentMethodRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let new_method = NewPaymentMethod {
        owner_id: user.id.clone(),
        label: request.label,
        display_name: request.display_name,
        is_default: false,
    };
    let id = state.store().add_payment_method(&new_method).await?;

    if request.is_default {
        state
            .store()
            .set_default_payment_method(&user.id, &id)
            .await?;
    }

    Ok((StatusCode::CREATED, Json(json!({ "payment_method_id": id }))))
}

/// DELETE /account/payment-methods/{id}
pub async fn delete_payment_method(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<PaymentMethodId>,
) -> Result<StatusCode> {
    let owned = state
        .store()
        .payment_methods_for(&user.id)
        .await?
        .iter()
        .any(|method| method.id == id);
    if !owned {
        return Err(AppError::NotFound(format!("payment_methods/{id}")));
    }

    state.store().delete_payment_method(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /account/payment-methods/{id}/default - make this the only default.
pub async fn set_default_payment_method(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<PaymentMethodId>,
) -> Result<StatusCode> {
    state
        .store()
        .set_default_payment_method(&user.id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Vouchers
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateVoucherRequest {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

/// GET /account/vouchers
pub async fn vouchers(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Voucher>>> {
    Ok(Json(state.store().vouchers_for(&user.id).await?))
}

/// POST /account/vouchers
pub async fn create_voucher(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CreateVoucherRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    if request.code.trim().is_empty() {
        return Err(AppError::Validation("code must not be empty".to_string()));
    }

    let new_voucher = NewVoucher {
        owner_id: user.id,
        code: request.code.trim().to_string(),
        description: request.description,
        used: false,
        created_at: Utc::now(),
    };
    let id = state.store().add_voucher(&new_voucher).await?;
    Ok((StatusCode::CREATED, Json(json!({ "voucher_id": id }))))
}

/// DELETE /account/vouchers/{id}
pub async fn delete_voucher(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<VoucherId>,
) -> Result<StatusCode> {
    let owned = state
        .store()
        .vouchers_for(&user.id)
        .await?
        .iter()
        .any(|voucher| voucher.id == id);
    if !owned {
        return Err(AppError::NotFound(format!("vouchers/{id}")));
    }

    state.store().delete_voucher(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Favorites
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateFavoriteRequest {
    pub food_id: FoodId,
}

/// GET /account/favorites
pub async fn favorites(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Favorite>>> {
    Ok(Json(state.store().favorites_for(&user.id).await?))
}

/// POST /account/favorites - idempotent: favoriting twice returns the
/// existing pair.
pub async fn create_favorite(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CreateFavoriteRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let food = state
        .store()
        .get_food(&request.food_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("foods/{}", request.food_id)))?;

    // Uniqueness is query-before-insert; a lost race leaves a duplicate
    // pair, which the listing tolerates.
    if let Some(existing) = state.store().find_favorite(&user.id, &food.id).await? {
        return Ok((StatusCode::OK, Json(json!({ "favorite_id": existing.id }))));
    }

    let favorite = NewFavorite {
        owner_id: user.id,
        food_id: food.id,
        created_at: Utc::now(),
    };
    let id = state.store().add_favorite(&favorite).await?;
    Ok((StatusCode::CREATED, Json(json!({ "favorite_id": id }))))
}

/// DELETE /account/favorites/{food_id}
pub async fn delete_favorite(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(food_id): Path<FoodId>,
) -> Result<StatusCode> {
    let favorite = state
        .store()
        .find_favorite(&user.id, &food_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("favorites for food {food_id}")))?;

    state.store().delete_favorite(&favorite.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
