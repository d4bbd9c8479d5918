//! Price lookups against a RapidAPI Amazon price endpoint
//!
//! Every failure is treated as routine: [`PriceFetcher::current_price`] logs
//! it and reports the price as unavailable.

use crate::asin::Asin;
use crate::error::FetchError;
use crate::provider::{extract_price, ProviderProfile};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Upper bound for a single price request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "price_tracker/0.1";

/// Anything that can report the current price of a product
pub trait PriceSource {
    /// `None` means the price is unavailable right now.
    fn current_price(&self, asin: &Asin) -> impl Future<Output = Option<f64>>;
}

/// HTTP client for one provider profile
pub struct PriceFetcher {
    client: reqwest::Client,
    api_key: String,
    profile: ProviderProfile,
}

impl PriceFetcher {
    pub fn new(api_key: String, profile: ProviderProfile) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            api_key,
            profile,
        }
    }

    /// Point the fetcher at a different URL (mock servers, proxies)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.profile.endpoint = endpoint.into();
        self
    }

    pub fn profile(&self) -> &ProviderProfile {
        &self.profile
    }

    /// One request, no retry.
    pub async fn try_fetch(&self, asin: &Asin) -> Result<f64, FetchError> {
        log::debug!(
            "Requesting price for {} from {}",
            asin,
            self.profile.endpoint
        );

        let response = self
            .client
            .get(&self.profile.endpoint)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.profile.host)
            .query(&self.profile.query(asin.as_str()))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status()));
        }

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;

        extract_price(&body, &self.profile.price_pointer)
            .ok_or_else(|| FetchError::MissingPrice(self.profile.price_pointer.clone()))
    }
}

impl PriceSource for PriceFetcher {
    async fn current_price(&self, asin: &Asin) -> Option<f64> {
        match self.try_fetch(asin).await {
            Ok(price) => {
                log::debug!("{} is at ${:.2}", asin, price);
                Some(price)
            }
            Err(e) => {
                log::warn!("Price lookup for {} failed: {}", asin, e);
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod tests;
