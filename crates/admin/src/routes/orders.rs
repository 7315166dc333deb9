//! Order console: listing, guarded status transitions, shipper assignment.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::info;

use monngon_core::{OrderId, OrderStatus, ShipperId};
use monngon_store::documents::Order;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize)]
pub struct AssignShipperRequest {
    pub shipper_id: ShipperId,
}

/// GET /orders - every order, newest first, optionally filtered by status.
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<OrdersQuery>,
) -> Result<Json<Vec<Order>>> {
    let orders = state.store().list_orders(params.status).await?;
    Ok(Json(orders))
}

/// GET /orders/{id}
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    let order = fetch_order(&state, &id).await?;
    Ok(Json(order))
}

/// POST /orders/{id}/status - move an order along the lifecycle graph.
///
/// The transition guard runs against the order's current status as stored;
/// a rejected transition responds 409 and writes nothing.
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<OrderId>,
    Json(request): Json<SetStatusRequest>,
) -> Result<StatusCode> {
    let order = fetch_order(&state, &id).await?;
    let next = order.status.transition(request.status)?;

    state.store().set_order_status(&order.id, next).await?;
    info!(
        order_id = %order.id,
        from = %order.status,
        to = %next,
        admin = %admin.id,
        "order status changed"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// POST /orders/{id}/shipper - assign a shipper.
///
/// The assignment and the move to `shipping` are one store write, guarded
/// against the stored status like any other transition.
pub async fn assign_shipper(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<OrderId>,
    Json(request): Json<AssignShipperRequest>,
) -> Result<StatusCode> {
    let order = fetch_order(&state, &id).await?;
    order.status.transition(OrderStatus::Shipping)?;

    state
        .store()
        .assign_shipper(&order.id, &request.shipper_id)
        .await?;
    info!(
        order_id = %order.id,
        shipper = %request.shipper_id,
        admin = %admin.id,
        "shipper assigned"
    );
    Ok(StatusCode::NO_CONTENT)
}

async fn fetch_order(state: &AppState, id: &OrderId) -> Result<Order> {
    state
        .store()
        .get_order(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("orders/{id}")))
}
