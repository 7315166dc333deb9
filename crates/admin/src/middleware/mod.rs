//! HTTP middleware stack for the admin console.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. `RequireAdmin` extractor on every console route

pub mod auth;

pub use auth::{AdminUser, RequireAdmin};
