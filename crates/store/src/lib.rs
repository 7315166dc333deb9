//! MonNgon document store client.
//!
//! # Architecture
//!
//! - All persistent state lives in the remote document store; this crate is
//!   the only place that speaks its JSON/REST dialect
//! - The store is source of truth - NO local sync, direct API calls
//! - Typed records with decode-time validation at the boundary; a document
//!   that fails validation is an error, never a partially-populated value
//! - In-memory caching via `moka` for catalog reads (5 minute TTL)
//!
//! # Store interface
//!
//! The store exposes flat-field documents grouped in named collections:
//!
//! - `GET    /v1/collections/{name}/docs/{id}` - fetch one document
//! - `POST   /v1/collections/{name}/query`     - filters + order-by + limit
//! - `POST   /v1/collections/{name}/docs`      - create, store assigns the id
//! - `PATCH  /v1/collections/{name}/docs/{id}` - partial merge (upsert)
//! - `DELETE /v1/collections/{name}/docs/{id}` - delete
//! - `POST   /v1/batch`                        - best-effort batched patch/delete
//! - `POST   /v1/commit`                       - transactional write, all-or-nothing
//! - `GET    /v1/ping`                         - readiness probe
//!
//! # Example
//!
//! ```rust,ignore
//! use monngon_store::{StoreClient, StoreConfig};
//!
//! let client = StoreClient::new(&config);
//!
//! // Browse the catalog
//! let categories = client.list_categories().await?;
//! let foods = client.list_available_foods(Some(&categories[0].id)).await?;
//!
//! // Place an order atomically with the cart cleanup
//! let order_id = client.place_order(&new_order, &selected_line_ids).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod client;
mod config;
mod error;
pub mod documents;
pub mod query;

pub use client::StoreClient;
pub use config::StoreConfig;
pub use error::StoreError;

/// Collection names owned by the document store.
pub mod collections {
    pub const USERS: &str = "users";
    pub const FOODS: &str = "foods";
    pub const CATEGORIES: &str = "categories";
    pub const ORDERS: &str = "orders";
    pub const CARTS: &str = "carts";
    pub const FAVORITES: &str = "favorites";
    pub const ADDRESSES: &str = "addresses";
    pub const PAYMENT_METHODS: &str = "payment_methods";
    pub const VOUCHERS: &str = "vouchers";
}
