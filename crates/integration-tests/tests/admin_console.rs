//! Integration tests for the admin console.
//!
//! These tests require:
//! - The admin server running (cargo run -p monngon-admin)
//! - `ADMIN_TEST_TOKEN` set to a bearer token for an admin account
//!   (promote one with `monngon-cli admin grant`)
//!
//! Run with: cargo test -p monngon-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use monngon_integration_tests::{admin_base_url, admin_token, client};

fn require_token() -> String {
    admin_token().expect("ADMIN_TEST_TOKEN must be set for admin tests")
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_console_requires_a_token() {
    let client = client();
    let base_url = admin_base_url();

    for path in ["/orders", "/foods", "/categories", "/users"] {
        let resp = client
            .get(format!("{base_url}{path}"))
            .send()
            .await
            .expect("Failed to reach admin server");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{path}");
    }
}

#[tokio::test]
#[ignore = "Requires running admin server and ADMIN_TEST_TOKEN"]
async fn test_order_listing_and_status_filter() {
    let client = client();
    let base_url = admin_base_url();
    let token = require_token();

    let resp = client
        .get(format!("{base_url}/orders"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to list orders");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/orders?status=pending"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to filter orders");
    assert_eq!(resp.status(), StatusCode::OK);

    let orders: Vec<Value> = resp.json().await.expect("Failed to parse orders");
    assert!(orders.iter().all(|o| o["status"] == "pending"));
}

#[tokio::test]
#[ignore = "Requires running admin server and ADMIN_TEST_TOKEN"]
async fn test_category_lifecycle() {
    let client = client();
    let base_url = admin_base_url();
    let token = require_token();

    // Create
    let resp = client
        .post(format!("{base_url}/categories"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Integration specials", "priority": 99 }))
        .send()
        .await
        .expect("Failed to create category");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse response");
    let id = body["category_id"].as_str().expect("missing id").to_string();

    // Rename
    let resp = client
        .patch(format!("{base_url}/categories/{id}"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Integration specials (renamed)" }))
        .send()
        .await
        .expect("Failed to update category");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Empty name is rejected
    let resp = client
        .patch(format!("{base_url}/categories/{id}"))
        .bearer_auth(&token)
        .json(&json!({ "name": "  " }))
        .send()
        .await
        .expect("Failed to reach admin server");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Delete
    let resp = client
        .delete(format!("{base_url}/categories/{id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete category");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "Requires running admin server and ADMIN_TEST_TOKEN"]
async fn test_unknown_order_transition_is_404() {
    let client = client();
    let base_url = admin_base_url();
    let token = require_token();

    let resp = client
        .post(format!("{base_url}/orders/does-not-exist/status"))
        .bearer_auth(&token)
        .json(&json!({ "status": "confirmed" }))
        .send()
        .await
        .expect("Failed to reach admin server");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
