//! Tests for the price fetcher.

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{PriceFetcher, PriceSource};
use crate::asin::{extract_asin, Asin};
use crate::error::FetchError;
use crate::provider::ProviderProfile;

fn asin() -> Asin {
    extract_asin("https://www.amazon.com/dp/B00ABCDEFG").unwrap()
}

fn fetcher_for(server: &MockServer, profile: ProviderProfile) -> PriceFetcher {
    PriceFetcher::new("test-key".to_string(), profile)
        .with_endpoint(format!("{}/product-offers", server.uri()))
}

fn offers_json(prices: &[f64]) -> serde_json::Value {
    let offers: Vec<_> = prices
        .iter()
        .map(|p| serde_json::json!({ "price": { "value": p, "currency": "USD" } }))
        .collect();
    serde_json::json!({ "status": "OK", "data": { "product_offers": offers } })
}

// ── try_fetch ────────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_sends_key_host_and_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/product-offers"))
        .and(header("X-RapidAPI-Key", "test-key"))
        .and(header("X-RapidAPI-Host", "real-time-amazon-data.p.rapidapi.com"))
        .and(query_param("asin", "B00ABCDEFG"))
        .and(query_param("country", "US"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(offers_json(&[23.5])))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, ProviderProfile::real_time_amazon_data());
    let price = fetcher.try_fetch(&asin()).await.unwrap();
    assert_eq!(price, 23.5);
}

#[tokio::test]
async fn fetch_uses_first_offer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(offers_json(&[41.0, 39.0])))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, ProviderProfile::real_time_amazon_data());
    assert_eq!(fetcher.try_fetch(&asin()).await.unwrap(), 41.0);
}

#[tokio::test]
async fn fetch_flat_offer_list_profile() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("X-RapidAPI-Host", "amazon-price1.p.rapidapi.com"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{ "asin": "B00ABCDEFG", "price": 17.25 }])),
        )
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, ProviderProfile::amazon_price_offers());
    assert_eq!(fetcher.try_fetch(&asin()).await.unwrap(), 17.25);
}

#[tokio::test]
async fn fetch_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, ProviderProfile::real_time_amazon_data());
    match fetcher.try_fetch(&asin()).await {
        Err(FetchError::HttpStatus(status)) => assert_eq!(status.as_u16(), 429),
        other => panic!("Expected FetchError::HttpStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_malformed_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, ProviderProfile::real_time_amazon_data());
    assert!(matches!(
        fetcher.try_fetch(&asin()).await,
        Err(FetchError::Parse(_))
    ));
}

#[tokio::test]
async fn fetch_empty_offers_is_missing_price() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(offers_json(&[])))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, ProviderProfile::real_time_amazon_data());
    assert!(matches!(
        fetcher.try_fetch(&asin()).await,
        Err(FetchError::MissingPrice(_))
    ));
}

#[tokio::test]
async fn fetch_unreachable_host_is_network_error() {
    // Port 9 (discard) on localhost is not listening
    let fetcher = PriceFetcher::new(
        "test-key".to_string(),
        ProviderProfile::real_time_amazon_data(),
    )
    .with_endpoint("http://127.0.0.1:9/product-offers");

    assert!(matches!(
        fetcher.try_fetch(&asin()).await,
        Err(FetchError::Network(_))
    ));
}

// ── current_price ────────────────────────────────────────────────────

#[tokio::test]
async fn current_price_returns_value() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(offers_json(&[23.5])))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, ProviderProfile::real_time_amazon_data());
    assert_eq!(fetcher.current_price(&asin()).await, Some(23.5));
}

#[tokio::test]
async fn current_price_collapses_failures_to_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(offers_json(&[])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, ProviderProfile::real_time_amazon_data());
    assert_eq!(fetcher.current_price(&asin()).await, None);
    assert_eq!(fetcher.current_price(&asin()).await, None);
}

#[test]
fn with_endpoint_keeps_rest_of_profile() {
    let fetcher = PriceFetcher::new("k".to_string(), ProviderProfile::real_time_amazon_data())
        .with_endpoint("http://localhost:1234/x");
    assert_eq!(fetcher.profile().endpoint, "http://localhost:1234/x");
    assert_eq!(
        fetcher.profile().price_pointer,
        "/data/product_offers/0/price/value"
    );
}
