//! HTTP route handlers for the admin console.
//!
//! All routes require a bearer token resolving to an admin profile.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (store ping)
//!
//! # Orders
//! GET  /orders                  - All orders (?status=<status>)
//! GET  /orders/{id}             - Order detail
//! POST /orders/{id}/status      - Guarded status transition
//! POST /orders/{id}/shipper     - Assign a shipper (forces shipping)
//!
//! # Foods
//! GET    /foods                 - Every food, available or not
//! POST   /foods                 - Create (multipart, optional image)
//! PATCH  /foods/{id}            - Update (multipart, optional image)
//! DELETE /foods/{id}            - Delete
//!
//! # Categories
//! GET    /categories            - Every category
//! POST   /categories            - Create
//! PATCH  /categories/{id}       - Update
//! DELETE /categories/{id}       - Delete
//!
//! # Users
//! GET  /users                   - Every profile, newest first
//! POST /users/{id}/block        - Block an account
//! POST /users/{id}/unblock      - Unblock an account
//! ```

pub mod categories;
pub mod foods;
pub mod orders;
pub mod users;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Create the order console router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
        .route("/{id}/status", post(orders::set_status))
        .route("/{id}/shipper", post(orders::assign_shipper))
}

/// Create the food catalog router.
pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(foods::index).post(foods::create))
        .route("/{id}", patch(foods::update).delete(foods::remove))
}

/// Create the category catalog router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index).post(categories::create))
        .route(
            "/{id}",
            patch(categories::update).delete(categories::remove),
        )
}

/// Create the user administration router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::index))
        .route("/{id}/block", post(users::block))
        .route("/{id}/unblock", post(users::unblock))
}

/// Create all routes for the admin console.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/orders", order_routes())
        .nest("/foods", food_routes())
        .nest("/categories", category_routes())
        .nest("/users", user_routes())
}
