//! Integration tests for the signed-in storefront flow.
//!
//! These tests require:
//! - The storefront server running (cargo run -p monngon-storefront)
//! - A reachable auth service and store project
//! - A seeded catalog for the cart tests
//!
//! Run with: cargo test -p monngon-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use monngon_integration_tests::{client, storefront_base_url, unique_email};

const TEST_PASSWORD: &str = "s3cret-password-for-tests";

/// Register a fresh account and return its bearer token.
async fn register(client: &Client) -> String {
    let base_url = storefront_base_url();
    let resp = client
        .post(format!("{base_url}/auth/register"))
        .json(&json!({
            "name": "Test Account",
            "email": unique_email(),
            "password": TEST_PASSWORD,
            "phone": "0901234567",
        }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("Failed to parse session");
    assert_eq!(body["role"], "user", "fresh accounts start as regular users");
    body["token"]
        .as_str()
        .expect("session is missing a token")
        .to_string()
}

/// First food id from the public listing.
async fn any_food_id(client: &Client) -> String {
    let base_url = storefront_base_url();
    let foods: Vec<Value> = client
        .get(format!("{base_url}/foods"))
        .send()
        .await
        .expect("Failed to get foods")
        .json()
        .await
        .expect("Failed to parse foods");
    foods
        .first()
        .and_then(|f| f["id"].as_str())
        .expect("catalog is not seeded")
        .to_string()
}

#[tokio::test]
#[ignore = "Requires running storefront server and auth service"]
async fn test_cart_requires_a_token() {
    let client = client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to reach storefront");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront server, auth service and seeded catalog"]
async fn test_register_then_shop() {
    let client = client();
    let base_url = storefront_base_url();
    let token = register(&client).await;

    // Fresh cart is empty
    let cart: Value = client
        .get(format!("{base_url}/cart"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to get cart")
        .json()
        .await
        .expect("Failed to parse cart");
    assert_eq!(cart["lines"].as_array().map(Vec::len), Some(0));

    // Add a line
    let food_id = any_food_id(&client).await;
    let resp = client
        .post(format!("{base_url}/cart/lines"))
        .bearer_auth(&token)
        .json(&json!({ "food_id": food_id, "quantity": 2 }))
        .send()
        .await
        .expect("Failed to add line");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Adding the same food again without merge reports the conflict
    let resp = client
        .post(format!("{base_url}/cart/lines"))
        .bearer_auth(&token)
        .json(&json!({ "food_id": food_id, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to re-add line");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // With merge the quantities add up
    let resp = client
        .post(format!("{base_url}/cart/lines"))
        .bearer_auth(&token)
        .json(&json!({ "food_id": food_id, "quantity": 1, "merge": true }))
        .send()
        .await
        .expect("Failed to merge line");
    assert_eq!(resp.status(), StatusCode::OK);

    let cart: Value = client
        .get(format!("{base_url}/cart"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to get cart")
        .json()
        .await
        .expect("Failed to parse cart");
    let lines = cart["lines"].as_array().expect("cart has lines");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["quantity"].as_u64(), Some(3));
}

#[tokio::test]
#[ignore = "Requires running storefront server and auth service"]
async fn test_zero_quantity_is_rejected() {
    let client = client();
    let base_url = storefront_base_url();
    let token = register(&client).await;

    let resp = client
        .post(format!("{base_url}/cart/lines"))
        .bearer_auth(&token)
        .json(&json!({ "food_id": "irrelevant", "quantity": 0 }))
        .send()
        .await
        .expect("Failed to reach storefront");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore = "Requires running storefront server and auth service"]
async fn test_password_reset_never_reveals_accounts() {
    let client = client();
    let base_url = storefront_base_url();

    // Same answer whether or not the account exists
    let resp = client
        .post(format!("{base_url}/auth/password-reset"))
        .json(&json!({ "email": unique_email() }))
        .send()
        .await
        .expect("Failed to request reset");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}
