//! Cart management.
//!
//! Cart lines snapshot the food's name, price, and image at add time so the
//! cart (and any order built from it) is immune to later catalog edits.
//! Concurrent edits are last-write-wins.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use monngon_core::{CartLineId, FoodId, Price};
use monngon_store::documents::{CartLine, NewCartLine};

use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddLineRequest {
    pub food_id: FoodId,
    pub quantity: u32,
    /// When the food is already in the cart: merge the quantities instead
    /// of reporting the duplicate.
    #[serde(default)]
    pub merge: bool,
}

#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub subtotal: Price,
}

/// GET /cart - the caller's lines plus their subtotal.
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<CartView>> {
    let lines = state.store().cart_lines_for(&user.id).await?;
    let subtotal = cart_subtotal(&lines);
    Ok(Json(CartView { lines, subtotal }))
}

/// POST /cart/lines - add a food to the cart.
///
/// If the caller already has a line for this food, responds 409 with the
/// existing line so the client can offer to merge; with `merge: true` the
/// quantities are combined instead.
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<AddLineRequest>,
) -> Result<Response> {
    if request.quantity < 1 {
        return Err(AppError::Validation(
            "quantity must be at least 1".to_string(),
        ));
    }

    let food = state
        .store()
        .get_food(&request.food_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("foods/{}", request.food_id)))?;
    if !food.is_available {
        return Err(AppError::Validation(format!(
            "{} is currently unavailable",
            food.name
        )));
    }

    if let Some(existing) = state.store().find_cart_line(&user.id, &food.id).await? {
        if !request.merge {
            return Ok((
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "this food is already in the cart",
                    "existing_line": existing,
                })),
            )
                .into_response());
        }

        let quantity = existing.quantity + request.quantity;
        state
            .store()
            .set_cart_line_quantity(&existing.id, quantity)
            .await?;
        return Ok((
            StatusCode::OK,
            Json(json!({ "line_id": existing.id, "quantity": quantity })),
        )
            .into_response());
    }

    let line = NewCartLine {
        owner_id: user.id,
        food_id: food.id,
        name: food.name,
        unit_price: food.price,
        image_url: food.image_url,
        quantity: request.quantity,
        created_at: Utc::now(),
    };
    let line_id = state.store().add_cart_line(&line).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "line_id": line_id, "quantity": request.quantity })),
    )
        .into_response())
}

/// PATCH /cart/lines/{id} - set a line's quantity.
pub async fn set_quantity(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<CartLineId>,
    Json(request): Json<SetQuantityRequest>,
) -> Result<StatusCode> {
    if request.quantity < 1 {
        return Err(AppError::Validation(
            "quantity must be at least 1; delete the line to remove it".to_string(),
        ));
    }

    let line = owned_line(&state, &user.id, &id).await?;
    state
        .store()
        .set_cart_line_quantity(&line.id, request.quantity)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /cart/lines/{id} - remove a line.
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<CartLineId>,
) -> Result<StatusCode> {
    let line = owned_line(&state, &user.id, &id).await?;
    state.store().delete_cart_line(&line.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fetch a line and confirm the caller owns it.
///
/// Foreign lines read as not-found so ids cannot be probed.
async fn owned_line(
    state: &AppState,
    owner: &monngon_core::UserId,
    id: &CartLineId,
) -> Result<CartLine> {
    state
        .store()
        .get_cart_line(id)
        .await?
        .filter(|line| &line.owner_id == owner)
        .ok_or_else(|| AppError::NotFound(format!("carts/{id}")))
}

/// Sum of price snapshot times quantity over the given lines.
#[must_use]
pub fn cart_subtotal(lines: &[CartLine]) -> Price {
    lines
        .iter()
        .fold(Price::vnd(0_i64), |acc, line| acc + line.line_total())
}

#[cfg(test)]
mod tests {
    use super::*;
    use monngon_core::UserId;
    use rust_decimal::Decimal;

    fn line(food: &str, price: i64, quantity: u32) -> CartLine {
        CartLine {
            id: CartLineId::new(format!("line-{food}")),
            owner_id: UserId::new("u-1"),
            food_id: FoodId::new(food),
            name: food.to_string(),
            unit_price: Price::vnd(price),
            image_url: None,
            quantity,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_subtotal_sums_price_times_quantity() {
        let lines = vec![line("pho", 45_000, 2), line("nem", 15_000, 1)];
        assert_eq!(cart_subtotal(&lines).amount, Decimal::from(105_000_i64));
    }

    #[test]
    fn test_subtotal_of_empty_cart_is_zero() {
        assert_eq!(cart_subtotal(&[]).amount, Decimal::ZERO);
    }
}
