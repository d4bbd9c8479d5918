//! Upstream price API profiles
//!
//! Providers nest the offer price differently, so where the price lives in
//! the response is part of the profile (a JSON pointer) rather than a
//! fixed response struct.

use crate::error::ConfigError;
use serde_json::Value;

/// Profile name used when `PRICE_PROVIDER` is unset
pub const DEFAULT_PROVIDER: &str = "real-time-amazon-data";

/// Endpoint, headers and response layout of one price API
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderProfile {
    pub name: &'static str,
    pub endpoint: String,
    /// Sent as `X-RapidAPI-Host`
    pub host: String,
    pub country: String,
    /// RFC 6901 pointer to the price inside the response body
    pub price_pointer: String,
    pub extra_query: Vec<(String, String)>,
}

impl ProviderProfile {
    /// Real-Time Amazon Data: `{"data": {"product_offers": [{"price": {"value": ..}}]}}`
    pub fn real_time_amazon_data() -> Self {
        Self {
            name: "real-time-amazon-data",
            endpoint: "https://real-time-amazon-data.p.rapidapi.com/product-offers".to_string(),
            host: "real-time-amazon-data.p.rapidapi.com".to_string(),
            country: "US".to_string(),
            price_pointer: "/data/product_offers/0/price/value".to_string(),
            extra_query: vec![
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "1".to_string()),
            ],
        }
    }

    /// Flat offer list: `[{"price": ..}, ...]`
    pub fn amazon_price_offers() -> Self {
        Self {
            name: "amazon-price-offers",
            endpoint: "https://amazon-price1.p.rapidapi.com/priceReport".to_string(),
            host: "amazon-price1.p.rapidapi.com".to_string(),
            country: "US".to_string(),
            price_pointer: "/0/price".to_string(),
            extra_query: Vec::new(),
        }
    }

    /// Look up a built-in profile by name
    pub fn by_name(name: &str) -> Result<Self, ConfigError> {
        match name.trim() {
            "real-time-amazon-data" => Ok(Self::real_time_amazon_data()),
            "amazon-price-offers" => Ok(Self::amazon_price_offers()),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }

    /// Full query string for one lookup
    pub fn query(&self, asin: &str) -> Vec<(String, String)> {
        let mut query = vec![
            ("asin".to_string(), asin.to_string()),
            ("country".to_string(), self.country.clone()),
        ];
        query.extend(self.extra_query.iter().cloned());
        query
    }
}

/// Read the price at `pointer`.
///
/// Accepts a JSON number or a numeric string. Missing keys, an empty offer
/// list, negative or non-finite values all yield `None`.
pub fn extract_price(body: &Value, pointer: &str) -> Option<f64> {
    let price = match body.pointer(pointer)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if price.is_finite() && price >= 0.0 {
        Some(price)
    } else {
        None
    }
}
