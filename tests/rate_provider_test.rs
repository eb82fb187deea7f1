//! Integration tests for the HTTP rate provider against a mock server.

use serde_json::json;
use std::time::Duration;
use tempfile::tempdir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

use cambio::converter::Converter;
use cambio::currency::{HttpRateProvider, ProviderError, RateProvider};
use cambio::store::PreferenceStore;

fn provider(server: &MockServer, api_key: Option<&str>) -> HttpRateProvider {
    HttpRateProvider::new(
        server.uri(),
        api_key.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_pair_conversion() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pair/USD/EUR/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "success",
            "base_code": "USD",
            "target_code": "EUR",
            "conversion_rate": 0.92,
            "conversion_result": 9.2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let conversion = provider(&server, None)
        .convert("USD", "EUR", 10.0)
        .await
        .unwrap();

    assert_eq!(conversion.rate, 0.92);
    assert_eq!(conversion.converted_amount, 9.2);
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pair/GBP/JPY/2.5"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversion_rate": 188.65,
            "conversion_result": 471.625
        })))
        .expect(1)
        .mount(&server)
        .await;

    let conversion = provider(&server, Some("test-key"))
        .convert("GBP", "JPY", 2.5)
        .await
        .unwrap();

    assert_eq!(conversion.rate, 188.65);
}

#[tokio::test]
async fn test_same_currency_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let conversion = provider(&server, None)
        .convert("HNL", "HNL", 33.0)
        .await
        .unwrap();

    assert_eq!(conversion.rate, 1.0);
    assert_eq!(conversion.converted_amount, 33.0);
}

#[tokio::test]
async fn test_server_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Internal server error"
        })))
        .mount(&server)
        .await;

    let err = provider(&server, None)
        .convert("USD", "EUR", 1.0)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_unauthorized_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Unauthorized"
        })))
        .mount(&server)
        .await;

    let err = provider(&server, Some("bad"))
        .convert("USD", "EUR", 1.0)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Status { status: 401, .. }));
}

#[tokio::test]
async fn test_api_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "error",
            "error-type": "unsupported-code"
        })))
        .mount(&server)
        .await;

    let err = provider(&server, None)
        .convert("USD", "ABC", 1.0)
        .await
        .unwrap_err();

    match err {
        ProviderError::Api(kind) => assert_eq!(kind, "unsupported-code"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_missing_fields_fail_to_decode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversion_rate": 0.92
        })))
        .mount(&server)
        .await;

    let err = provider(&server, None)
        .convert("USD", "EUR", 1.0)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Decode(_)));
}

#[tokio::test]
async fn test_non_json_body_fails_to_decode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = provider(&server, None)
        .convert("USD", "EUR", 1.0)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Decode(_)));
}

#[tokio::test]
async fn test_converter_caches_fetched_rate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pair/USD/HNL/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversion_rate": 24.65,
            "conversion_result": 246.5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let store = PreferenceStore::open(dir.path(), Duration::from_secs(3600));
    let mut converter = Converter::new(Box::new(provider(&server, None)), store);

    let first = converter.convert("10").await;
    assert_eq!(first.converted_amount, "246.50");
    assert_eq!(first.rate_line(), "1 USD = 24.6500 HNL");

    // served from the cache; the mock would reject a second request
    let second = converter.convert("2").await;
    assert_eq!(second.converted_amount, "49.30");
}

#[tokio::test]
async fn test_converter_shows_zero_on_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Not found"
        })))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let store = PreferenceStore::open(dir.path(), Duration::from_secs(3600));
    let mut converter = Converter::new(Box::new(provider(&server, None)), store);

    let view = converter.convert("10").await;
    assert_eq!(view.converted_amount, "0");
    assert!(converter.store().last_conversion().is_none());
}
