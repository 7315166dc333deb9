//! Order history, owner cancel, and post-delivery review.
//!
//! Every status change goes through `OrderStatus::transition`; a rejected
//! transition never reaches the store.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::info;

use monngon_core::{OrderId, OrderStatus, UserId};
use monngon_store::documents::Order;

use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub rating: u8,
    #[serde(default)]
    pub review: Option<String>,
}

/// GET /orders - the caller's orders, newest first.
pub async fn index(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Order>>> {
    let orders = state.store().orders_for(&user.id).await?;
    Ok(Json(orders))
}

/// GET /orders/{id} - one of the caller's orders.
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    let order = owned_order(&state, &user.id, &id).await?;
    Ok(Json(order))
}

/// POST /orders/{id}/cancel - cancel a pending order.
///
/// Owners may only cancel before the restaurant confirms; later states are
/// the admin console's business. Terminal states reject through the
/// transition guard.
pub async fn cancel(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<OrderId>,
) -> Result<StatusCode> {
    let order = owned_order(&state, &user.id, &id).await?;
    let next = owner_cancel(order.status)?;

    state.store().set_order_status(&order.id, next).await?;
    info!(order_id = %order.id, "order cancelled by owner");
    Ok(StatusCode::NO_CONTENT)
}

/// The status an owner-initiated cancel writes, if allowed from `status`.
///
/// Terminal states reject through the transition guard; anything past
/// `pending` is the admin console's business and rejects as forbidden.
/// Either way no store write happens.
fn owner_cancel(status: OrderStatus) -> Result<OrderStatus> {
    let next = status.transition(OrderStatus::Cancelled)?;
    if status != OrderStatus::Pending {
        return Err(AppError::Forbidden(
            "orders can only be cancelled while pending".to_string(),
        ));
    }
    Ok(next)
}

/// POST /orders/{id}/review - rate a delivered order, once.
///
/// The order is re-read so the delivered/unreviewed checks hold at write
/// time, not at whatever the client last saw.
pub async fn review(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<OrderId>,
    Json(request): Json<ReviewRequest>,
) -> Result<StatusCode> {
    if !(1..=5).contains(&request.rating) {
        return Err(AppError::Validation(
            "rating must be between 1 and 5".to_string(),
        ));
    }

    let order = owned_order(&state, &user.id, &id).await?;
    if order.status != OrderStatus::Delivered {
        return Err(AppError::Validation(
            "only delivered orders can be reviewed".to_string(),
        ));
    }
    if order.rating.is_some() {
        return Err(AppError::Validation(
            "this order has already been reviewed".to_string(),
        ));
    }

    state
        .store()
        .attach_review(&order.id, request.rating, request.review.as_deref())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fetch an order and confirm the caller owns it.
///
/// Foreign orders read as not-found so ids cannot be probed.
async fn owned_order(state: &AppState, owner: &UserId, id: &OrderId) -> Result<Order> {
    state
        .store()
        .get_order(id)
        .await?
        .filter(|order| &order.owner_id == owner)
        .ok_or_else(|| AppError::NotFound(format!("orders/{id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_can_cancel_while_pending() {
        let next = owner_cancel(OrderStatus::Pending).expect("pending cancels");
        assert_eq!(next, OrderStatus::Cancelled);
    }

    #[test]
    fn test_owner_cannot_cancel_once_confirmed() {
        // Confirmed, preparing and shipping are still on the lifecycle graph,
        // so the rejection is the pending-only policy, not the guard
        for status in [
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Shipping,
        ] {
            match owner_cancel(status) {
                Err(AppError::Forbidden(_)) => {}
                other => panic!("{status}: expected forbidden, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_owner_cancel_of_terminal_order_is_a_rejected_transition() {
        for status in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            match owner_cancel(status) {
                Err(AppError::Transition(_)) => {}
                other => panic!("{status}: expected rejected transition, got {other:?}"),
            }
        }
    }
}
