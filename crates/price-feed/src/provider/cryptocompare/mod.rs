//! CryptoCompare provider for crypto spot prices.
//!
//! Uses the single-symbol price endpoint:
//! `GET /data/price?fsym=ETH&tsyms=USD,EUR` which answers `{"USD": 2000.5, "EUR": 1850.1}`
//! on success and `{"Response": "Error", "Message": "..."}` on failure (with HTTP 200).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::PriceFeedError;
use crate::models::PriceQuote;
use crate::provider::PriceFeedProvider;

const PROVIDER_ID: &str = "CRYPTOCOMPARE";

const DEFAULT_BASE_URL: &str = "https://min-api.cryptocompare.com";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// CryptoCompare spot price provider.
///
/// ```ignore
/// use fundhub_price_feed::CryptoCompareProvider;
///
/// let provider = CryptoCompareProvider::new(None);
/// let quotes = provider.latest_prices("ETH", &["USD".to_string()]).await?;
/// ```
pub struct CryptoCompareProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl CryptoCompareProvider {
    /// Create a provider. The API key is optional for the public price endpoint.
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the provider at another host (self-hosted proxy, test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn price_url(&self, base: &str, quotes: &[String]) -> String {
        format!(
            "{}/data/price?fsym={}&tsyms={}",
            self.base_url,
            urlencoding::encode(base),
            urlencoding::encode(&quotes.join(","))
        )
    }

    /// Turns a price endpoint body into quotes, one per requested currency.
    fn parse_prices(
        body: &Value,
        base: &str,
        quotes: &[String],
        observed_at: DateTime<Utc>,
    ) -> Result<Vec<PriceQuote>, PriceFeedError> {
        let object = body.as_object().ok_or_else(|| PriceFeedError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: "Response is not a JSON object".to_string(),
        })?;

        if object.get("Response").and_then(Value::as_str) == Some("Error") {
            let message = object
                .get("Message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string();
            return Err(PriceFeedError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message,
            });
        }

        quotes
            .iter()
            .map(|quote| {
                let raw = object
                    .get(quote)
                    .and_then(Value::as_f64)
                    .ok_or_else(|| PriceFeedError::SymbolNotFound(format!("{}/{}", base, quote)))?;

                if !raw.is_finite() || raw <= 0.0 {
                    return Err(PriceFeedError::InvalidPrice {
                        symbol: quote.clone(),
                        message: format!("non-positive price {}", raw),
                    });
                }

                let price = Decimal::try_from(raw).map_err(|e| PriceFeedError::InvalidPrice {
                    symbol: quote.clone(),
                    message: e.to_string(),
                })?;

                Ok(PriceQuote::new(base, quote.as_str(), price, observed_at, PROVIDER_ID))
            })
            .collect()
    }
}

#[async_trait]
impl PriceFeedProvider for CryptoCompareProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn latest_prices(
        &self,
        base: &str,
        quotes: &[String],
    ) -> Result<Vec<PriceQuote>, PriceFeedError> {
        if quotes.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.price_url(base, quotes);
        debug!("Fetching {} prices for {} in {:?}", PROVIDER_ID, base, quotes);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("authorization", format!("Apikey {}", key));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                PriceFeedError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                PriceFeedError::Network(e)
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("{} rate limited the price request", PROVIDER_ID);
            return Err(PriceFeedError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PriceFeedError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PriceFeedError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        Self::parse_prices(&body, base, quotes, Utc::now())
    }
}
