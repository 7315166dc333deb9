//! Integration tests for MonNgon.
//!
//! The tests under `tests/` drive the storefront and admin APIs over HTTP
//! and are ignored by default. To run them:
//!
//! ```bash
//! # Start both binaries against a test store project
//! cargo run -p monngon-storefront &
//! cargo run -p monngon-admin &
//!
//! # Run the ignored tests
//! cargo test -p monngon-integration-tests -- --ignored
//! ```
//!
//! Base URLs come from `STOREFRONT_BASE_URL` and `ADMIN_BASE_URL`, falling
//! back to the local defaults. Admin tests additionally need
//! `ADMIN_TEST_TOKEN`, a bearer token for an account holding the admin role.

use reqwest::Client;

/// Base URL for the storefront API.
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin API.
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Bearer token for an admin account, if configured.
#[must_use]
pub fn admin_token() -> Option<String> {
    std::env::var("ADMIN_TEST_TOKEN").ok()
}

/// Plain HTTP client for the tests.
#[must_use]
pub fn client() -> Client {
    Client::new()
}

/// An email address unlikely to collide across test runs.
#[must_use]
pub fn unique_email() -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("test+{nanos}@example.com")
}
