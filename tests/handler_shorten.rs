mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use snaplink::api::handlers::shorten_handler;

fn test_server() -> TestServer {
    let state = common::create_test_state();
    let app = Router::new()
        .route("/api/shorten", post(shorten_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_single_url_success() {
    let server = test_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let body = response.json::<serde_json::Value>();
    let result = body["result"].as_str().unwrap();

    assert!(result.starts_with("https://sn.test/"));
    assert_eq!(common::code_of(result).len(), 8);
}

#[tokio::test]
async fn test_shorten_duplicate_returns_conflict_with_same_code() {
    let server = test_server();

    let first = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;
    first.assert_status(axum::http::StatusCode::CREATED);
    let first_result = first.json::<serde_json::Value>()["result"]
        .as_str()
        .unwrap()
        .to_string();

    let second = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;
    second.assert_status(axum::http::StatusCode::CONFLICT);
    let second_result = second.json::<serde_json::Value>()["result"]
        .as_str()
        .unwrap()
        .to_string();

    assert_eq!(first_result, second_result);
}

#[tokio::test]
async fn test_shorten_equivalent_urls_deduplicate() {
    let server = test_server();

    let first = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/page" }))
        .await;
    first.assert_status(axum::http::StatusCode::CREATED);

    // Same URL up to normalization: host case, default port, fragment.
    let second = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://EXAMPLE.com:443/page#intro" }))
        .await;
    second.assert_status(axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_shorten_invalid_url_rejected() {
    let server = test_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "not a url" }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_empty_url_rejected() {
    let server = test_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "" }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_distinct_urls_get_distinct_codes() {
    let server = test_server();

    let mut codes = Vec::new();
    for url in [
        "https://example.com/1",
        "https://example.com/2",
        "https://example.com/3",
    ] {
        let response = server.post("/api/shorten").json(&json!({ "url": url })).await;
        response.assert_status(axum::http::StatusCode::CREATED);
        codes.push(
            response.json::<serde_json::Value>()["result"]
                .as_str()
                .unwrap()
                .to_string(),
        );
    }

    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), 3);
}
