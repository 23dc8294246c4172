//! Tests for the HTTP client module

use super::*;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_none());
    assert!(config.user_agent.starts_with("photo-pager/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(Duration::from_secs(60))
        .rate_limit(RateLimiterConfig::new(5, 5))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(5, 5)));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_keeps_query_order() {
    let config = RequestConfig::new().query("_page", 1).query("_limit", 10);

    assert_eq!(
        config.query,
        vec![
            ("_page".to_string(), "1".to_string()),
            ("_limit".to_string(), "10".to_string())
        ]
    );
}

#[test]
fn test_build_url() {
    let config = HttpClientConfig::builder()
        .base_url("https://jsonplaceholder.typicode.com/")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(
        client.build_url("/photos"),
        "https://jsonplaceholder.typicode.com/photos"
    );
    assert_eq!(
        client.build_url("photos"),
        "https://jsonplaceholder.typicode.com/photos"
    );
    assert_eq!(
        client.build_url("http://other.example.com/x"),
        "http://other.example.com/x"
    );
}

#[tokio::test]
async fn test_http_client_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photos"))
        .and(query_param("_page", "2"))
        .and(query_param("_limit", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = client
        .get(
            "/photos",
            RequestConfig::new().query("_page", 2).query("_limit", 30),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_sends_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photos"))
        .and(header("X-Client", "pager"))
        .and(header("User-Agent", "gallery/2.0"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Client", "pager")
        .user_agent("gallery/2.0")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = client.get("/photos", RequestConfig::new()).await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_returns_failure_status_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = client.get("/photos", RequestConfig::new()).await.unwrap();
    assert_eq!(response.status(), 500);
    assert_eq!(response.text().await.unwrap(), "boom");
}

#[tokio::test]
async fn test_http_client_connection_failure_is_error() {
    // Nothing listens on this port once the server is dropped
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let config = HttpClientConfig::builder()
        .base_url(uri)
        .timeout(Duration::from_secs(2))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let result = client.get("/photos", RequestConfig::new()).await;
    assert!(matches!(result, Err(crate::Error::Http(_))));
}

#[tokio::test]
async fn test_http_client_with_rate_limiter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .rate_limit(RateLimiterConfig::new(100, 3))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    for _ in 0..3 {
        client.get("/photos", RequestConfig::new()).await.unwrap();
    }
}
