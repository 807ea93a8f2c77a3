use async_trait::async_trait;
use fundhub_price_feed::PriceFeedProvider;
use log::debug;
use std::sync::Arc;

use super::fx_model::ExchangeRate;
use super::fx_traits::ExchangeRateProvider;
use crate::errors::{Error, Result};

/// Adapts a price feed provider to the engine's rate provider contract.
///
/// Every feed failure, and any price the feed returns that is not a usable
/// rate, is reported as `RateUnavailable`. The feed's retry class decides
/// whether the error is retryable; unusable prices never are.
pub struct PriceFeedRateProvider {
    feed: Arc<dyn PriceFeedProvider>,
}

impl PriceFeedRateProvider {
    pub fn new(feed: Arc<dyn PriceFeedProvider>) -> Self {
        Self { feed }
    }
}

#[async_trait]
impl ExchangeRateProvider for PriceFeedRateProvider {
    async fn fetch(&self, base: &str, quotes: &[String]) -> Result<Vec<ExchangeRate>> {
        let prices = self.feed.latest_prices(base, quotes).await.map_err(|e| {
            debug!(
                "{} price fetch failed ({:?}): {}",
                self.feed.id(),
                e.retry_class(),
                e
            );
            Error::from(e)
        })?;

        prices
            .into_iter()
            .map(|p| {
                ExchangeRate::new(p.base, p.quote, p.price, p.timestamp, p.source)
                    .map_err(|e| Error::rate_unavailable(e.to_string(), false))
            })
            .collect()
    }
}
