//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Bearer-token extractors on protected routes

pub mod auth;

pub use auth::{CurrentUser, RequireUser, bearer_token};
