//! Integration tests for the public catalog.
//!
//! These tests require:
//! - The storefront server running (cargo run -p monngon-storefront)
//! - A seeded store project (monngon-cli seed catalog)
//!
//! Run with: cargo test -p monngon-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use monngon_integration_tests::{client, storefront_base_url};

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_health_endpoints() {
    let client = client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to reach storefront");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to reach storefront");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded catalog"]
async fn test_categories_are_public_and_ordered() {
    let client = client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/categories"))
        .send()
        .await
        .expect("Failed to get categories");
    assert_eq!(resp.status(), StatusCode::OK);

    let categories: Vec<Value> = resp.json().await.expect("Failed to parse categories");
    assert!(!categories.is_empty());

    let priorities: Vec<i64> = categories
        .iter()
        .filter_map(|c| c["priority"].as_i64())
        .collect();
    let mut sorted = priorities.clone();
    sorted.sort_unstable();
    assert_eq!(priorities, sorted, "categories must come back in display order");
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded catalog"]
async fn test_food_listing_hides_unavailable() {
    let client = client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/foods"))
        .send()
        .await
        .expect("Failed to get foods");
    assert_eq!(resp.status(), StatusCode::OK);

    let foods: Vec<Value> = resp.json().await.expect("Failed to parse foods");
    assert!(
        foods.iter().all(|f| f["is_available"] == Value::Bool(true)),
        "unavailable foods must not appear in the public listing"
    );
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_unknown_food_is_404() {
    let client = client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/foods/does-not-exist"))
        .send()
        .await
        .expect("Failed to reach storefront");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
