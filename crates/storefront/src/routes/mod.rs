//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (store ping)
//!
//! # Catalog (public)
//! GET  /categories              - Category list, priority-sorted
//! GET  /foods                   - Available foods (?category=<id>)
//! GET  /foods/{id}              - Food detail
//!
//! # Cart (requires auth)
//! GET    /cart                  - Cart lines + subtotal
//! POST   /cart/lines            - Add a line (409 on duplicate unless merge)
//! PATCH  /cart/lines/{id}       - Set quantity (>= 1)
//! DELETE /cart/lines/{id}       - Remove a line
//!
//! # Checkout (requires auth)
//! POST /checkout                - Place an order from selected cart lines
//!
//! # Orders (requires auth)
//! GET  /orders                  - Order history, newest first
//! GET  /orders/{id}             - Order detail
//! POST /orders/{id}/cancel      - Cancel (pending only)
//! POST /orders/{id}/review      - Rate a delivered order, once
//!
//! # Account (requires auth)
//! GET    /account/profile                     - Profile
//! PATCH  /account/profile                     - Edit profile
//! GET    /account/addresses                   - Address list
//! POST   /account/addresses                   - Add address
//! DELETE /account/addresses/{id}              - Delete address
//! POST   /account/addresses/{id}/default      - Make this the only default
//! GET    /account/payment-methods             - Payment method list
//! POST   /account/payment-methods             - Add payment method
//! DELETE /account/payment-methods/{id}        - Delete payment method
//! POST   /account/payment-methods/{id}/default - Make this the only default
//! GET    /account/vouchers                    - Voucher list
//! POST   /account/vouchers                    - Add voucher
//! DELETE /account/vouchers/{id}               - Delete voucher
//! GET    /account/favorites                   - Favorite list
//! POST   /account/favorites                   - Add favorite (idempotent)
//! DELETE /account/favorites/{food_id}         - Remove favorite
//!
//! # Auth
//! POST /auth/register           - Sign up + create profile
//! POST /auth/login              - Sign in
//! POST /auth/logout             - Revoke the bearer token
//! POST /auth/password-reset     - Send a reset email
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(catalog::categories))
        .route("/foods", get(catalog::foods))
        .route("/foods/{id}", get(catalog::food))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/lines", post(cart::add))
        .route(
            "/lines/{id}",
            patch(cart::set_quantity).delete(cart::remove),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
        .route("/{id}/cancel", post(orders::cancel))
        .route("/{id}/review", post(orders::review))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(account::profile).patch(account::update_profile),
        )
        .route(
            "/addresses",
            get(account::addresses).post(account::create_address),
        )
        .route("/addresses/{id}", delete(account::delete_address))
        .route("/addresses/{id}/default", post(account::set_default_address))
        .route(
            "/payment-methods",
            get(account::payment_methods).post(account::create_payment_method),
        )
        .route("/payment-methods/{id}", delete(account::delete_payment_method))
        .route(
            "/payment-methods/{id}/default",
            post(account::set_default_payment_method),
        )
        .route(
            "/vouchers",
            get(account::vouchers).post(account::create_voucher),
        )
        .route("/vouchers/{id}", delete(account::delete_voucher))
        .route(
            "/favorites",
            get(account::favorites).post(account::create_favorite),
        )
        .route("/favorites/{food_id}", delete(account::delete_favorite))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/password-reset", post(auth::password_reset))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::place))
        .nest("/orders", order_routes())
        .nest("/account", account_routes())
        .nest("/auth", auth_routes())
}
