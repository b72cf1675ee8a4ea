//! Tavily client tests against a mocked search API

#![allow(clippy::expect_used, clippy::unwrap_used)]

use serde_json::json;
use video_researcher_clients::{ClientError, TavilyClient};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn search_decodes_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(json!({"query": "rust async", "max_results": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": "rust async",
            "results": [
                {
                    "title": "Async Book",
                    "url": "https://rust-lang.github.io/async-book/",
                    "content": "Asynchronous programming in Rust",
                    "score": 0.97
                },
                {
                    "title": "Tokio",
                    "url": "https://tokio.rs",
                    "content": "A runtime for writing reliable async applications",
                    "score": 0.91
                }
            ],
            "response_time": 1.24
        })))
        .mount(&server)
        .await;

    let client = TavilyClient::with_base_url("test-key", server.uri());
    let results = client
        .search("rust async", 3)
        .await
        .expect("decode should succeed")
        .expect("search should return results");

    assert_eq!(results.query, "rust async");
    assert_eq!(results.results.len(), 2);
    assert_eq!(results.results[0].title, "Async Book");
    assert!(results.results[0].score > results.results[1].score);
}

#[tokio::test]
async fn rejected_credential_is_absent_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid API key"
        })))
        .mount(&server)
        .await;

    let client = TavilyClient::with_base_url("bad-key", server.uri());
    let results = client.search("anything", 5).await.unwrap();

    assert!(results.is_none());
}

#[tokio::test]
async fn schema_mismatch_is_malformed() {
    let server = MockServer::start().await;
    // A result entry without the required url field.
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": "rust",
            "results": [{"title": "no url here"}]
        })))
        .mount(&server)
        .await;

    let client = TavilyClient::with_base_url("test-key", server.uri());
    let result = client.search("rust", 5).await;

    assert!(matches!(result, Err(ClientError::Malformed(_))));
}
