//! HTTP tests against a running server

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

const IDENTITY_HEADER: &str = "X-User-Email";

fn base_url() -> String {
    std::env::var("SHELFMARK_TEST_URL").unwrap_or_else(|_| "http://localhost:5002/api".to_string())
}

/// A fresh identity per test keeps runs independent
fn identity() -> String {
    format!("http-{}@example.com", Uuid::new_v4())
}

async fn post(client: &Client, who: &str, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .post(format!("{}{}", base_url(), path))
        .header(IDENTITY_HEADER, who)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.expect("Failed to parse response"))
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
#[ignore]
async fn test_identity_is_required() {
    let client = Client::new();

    let response = client
        .get(format!("{}/checkouts", base_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_lending_flow() {
    let client = Client::new();
    let who = identity();

    let (status, book) = post(
        &client,
        &who,
        "/books",
        json!({"title": "The Left Hand of Darkness", "author": "Ursula K. Le Guin", "pages": "304"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(book["pages"], 304);

    let (status, copy) = post(&client, &who, "/book-copies", json!({"book_id": book["id"]})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(copy["copy_number"], 1);
    assert_eq!(copy["status"], "Available");

    let (status, borrower) = post(
        &client,
        &who,
        "/borrowers",
        json!({"first_name": "Genly", "last_name": "Ai"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, checkout) = post(
        &client,
        &who,
        "/checkouts",
        json!({"copy_id": copy["id"], "borrower_id": borrower["id"], "due_days": ""}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(checkout["status"], "Checked Out");

    let (status, error) = post(
        &client,
        &who,
        "/checkouts",
        json!({"copy_id": copy["id"], "borrower_id": borrower["id"]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "Book copy is not available");

    let response = client
        .get(format!("{}/book-copies/{}/status", base_url(), copy["id"].as_str().unwrap()))
        .header(IDENTITY_HEADER, &who)
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "Checked Out");

    let response = client
        .put(format!("{}/checkouts/{}/return", base_url(), checkout["id"].as_str().unwrap()))
        .header(IDENTITY_HEADER, &who)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "Returned");

    let response = client
        .get(format!("{}/dashboard/stats", base_url()))
        .header(IDENTITY_HEADER, &who)
        .send()
        .await
        .expect("Failed to send request");
    let stats: Value = response.json().await.unwrap();
    assert_eq!(stats["total_books"], 1);
    assert_eq!(stats["available_copies"], 1);
    assert_eq!(stats["active_checkouts"], 0);
}
