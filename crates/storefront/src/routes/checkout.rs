//! Checkout: turn selected cart lines into an order.
//!
//! The order document and the deletion of the consumed cart lines are
//! issued as one transactional commit against the store, so a placed order
//! always accounts for exactly the lines it consumed.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use monngon_core::{CartLineId, OrderId, OrderStatus, PaymentLabel, Price, UserId};
use monngon_store::documents::{CartLine, NewOrder, OrderItem, Recipient};

use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::state::AppState;

/// Flat delivery fee applied to every order.
const DELIVERY_FEE_VND: i64 = 15_000;

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    /// Cart lines to order; the rest of the cart is untouched.
    pub line_ids: Vec<CartLineId>,
    pub recipient: RecipientInput,
    #[serde(default)]
    pub note: Option<String>,
    pub payment: PaymentLabel,
}

#[derive(Debug, Deserialize)]
pub struct RecipientInput {
    pub name: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order_id: OrderId,
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
}

/// POST /checkout - place an order from the selected cart lines.
///
/// Lines are re-fetched from the store; stale or foreign ids fail
/// validation and nothing is written.
pub async fn place(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    let mut lines = Vec::with_capacity(request.line_ids.len());
    for id in &request.line_ids {
        let line = state
            .store()
            .get_cart_line(id)
            .await?
            .filter(|line| line.owner_id == user.id)
            .ok_or_else(|| {
                AppError::Validation(format!("cart line {id} no longer exists"))
            })?;
        lines.push(line);
    }

    let recipient = validate_checkout(&request.recipient, &lines)
        .map_err(AppError::Validation)?;

    let order = build_order(
        user.id,
        &lines,
        recipient,
        request.note,
        request.payment,
        Utc::now(),
    );
    let consumed: Vec<CartLineId> = lines.into_iter().map(|line| line.id).collect();

    let order_id = state.store().place_order(&order, &consumed).await?;
    info!(order_id = %order_id, total = %order.total, "order placed");

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            order_id,
            subtotal: order.subtotal,
            delivery_fee: order.delivery_fee,
            total: order.total,
        }),
    ))
}

/// Check the checkout inputs; returns the trimmed recipient on success.
///
/// Runs before any store write so a failed checkout changes nothing.
pub fn validate_checkout(
    recipient: &RecipientInput,
    lines: &[CartLine],
) -> std::result::Result<Recipient, String> {
    if lines.is_empty() {
        return Err("select at least one cart line".to_string());
    }

    let name = recipient.name.trim();
    let phone = recipient.phone.trim();
    let address = recipient.address.trim();
    if name.is_empty() {
        return Err("recipient name must not be empty".to_string());
    }
    if phone.is_empty() {
        return Err("recipient phone must not be empty".to_string());
    }
    if address.is_empty() {
        return Err("recipient address must not be empty".to_string());
    }

    Ok(Recipient {
        name: name.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
    })
}

/// Subtotal, flat delivery fee, and their sum for the given lines.
#[must_use]
pub fn order_totals(lines: &[CartLine]) -> (Price, Price, Price) {
    let subtotal = super::cart::cart_subtotal(lines);
    let delivery_fee = Price::vnd(DELIVERY_FEE_VND);
    let total = subtotal + delivery_fee;
    (subtotal, delivery_fee, total)
}

/// Assemble the order document from validated inputs.
///
/// Item snapshots come from the cart lines, not the live catalog.
#[must_use]
pub fn build_order(
    owner_id: UserId,
    lines: &[CartLine],
    recipient: Recipient,
    note: Option<String>,
    payment: PaymentLabel,
    created_at: DateTime<Utc>,
) -> NewOrder {
    let items = lines
        .iter()
        .map(|line| OrderItem {
            food_id: line.food_id.clone(),
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            image_url: line.image_url.clone(),
        })
        .collect();
    let (subtotal, delivery_fee, total) = order_totals(lines);

    NewOrder {
        owner_id,
        items,
        subtotal,
        delivery_fee,
        total,
        status: OrderStatus::Pending,
        recipient,
        note,
        payment,
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monngon_core::FoodId;
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

    fn recipient() -> RecipientInput {
        RecipientInput {
            name: "Nguyen Van A".to_string(),
            phone: "0901234567".to_string(),
            address: "12 Le Loi, Q1".to_string(),
        }
    }

    #[test]
    fn test_totals_for_two_line_cart() {
        // 45000 x 2 + 15000 x 1 = 105000, plus the flat fee
        let lines = vec![line("pho", 45_000, 2), line("nem", 15_000, 1)];
        let (subtotal, delivery_fee, total) = order_totals(&lines);
        assert_eq!(subtotal.amount, Decimal::from(105_000_i64));
        assert_eq!(delivery_fee.amount, Decimal::from(15_000_i64));
        assert_eq!(total.amount, Decimal::from(120_000_i64));
    }

    #[test]
    fn test_blank_recipient_field_is_rejected() {
        let lines = vec![line("pho", 45_000, 1)];

        let mut input = recipient();
        input.name = "   ".to_string();
        assert!(validate_checkout(&input, &lines).is_err());

        let mut input = recipient();
        input.phone = String::new();
        assert!(validate_checkout(&input, &lines).is_err());

        let mut input = recipient();
        input.address = "\t".to_string();
        assert!(validate_checkout(&input, &lines).is_err());
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        assert!(validate_checkout(&recipient(), &[]).is_err());
    }

    #[test]
    fn test_recipient_fields_are_trimmed() {
        let lines = vec![line("pho", 45_000, 1)];
        let input = RecipientInput {
            name: "  Nguyen Van A ".to_string(),
            phone: " 0901234567".to_string(),
            address: "12 Le Loi, Q1  ".to_string(),
        };
        let recipient = validate_checkout(&input, &lines).expect("valid");
        assert_eq!(recipient.name, "Nguyen Van A");
        assert_eq!(recipient.phone, "0901234567");
        assert_eq!(recipient.address, "12 Le Loi, Q1");
    }

    #[test]
    fn test_order_snapshots_match_selected_lines() {
        let lines = vec![line("pho", 45_000, 2), line("nem", 15_000, 1)];
        let recipient = validate_checkout(&recipient(), &lines).expect("valid");
        let order = build_order(
            UserId::new("u-1"),
            &lines,
            recipient,
            Some("extra chili".to_string()),
            PaymentLabel::Cod,
            Utc::now(),
        );

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 2);
        for (item, line) in order.items.iter().zip(&lines) {
            assert_eq!(item.food_id, line.food_id);
            assert_eq!(item.name, line.name);
            assert_eq!(item.unit_price, line.unit_price);
            assert_eq!(item.quantity, line.quantity);
        }
        assert_eq!(order.total.amount, Decimal::from(120_000_i64));
        assert_eq!(order.total, order.subtotal + order.delivery_fee);
    }
}
