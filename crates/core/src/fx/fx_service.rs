use chrono::Utc;
use log::{debug, warn};
use std::sync::{Arc, RwLock};

use super::fx_model::{ExchangeRate, QuotedRate};
use super::fx_traits::ExchangeRateProvider;
use crate::config::EngineConfig;
use crate::errors::{Error, Result};

/// Fetches the native/fiat rate and reports how trustworthy it is.
///
/// The last successfully fetched rate is kept in memory only. When the feed
/// fails it is handed out again, marked stale, instead of failing the caller;
/// without any previous rate the failure propagates.
pub struct ExchangeRateService {
    provider: Arc<dyn ExchangeRateProvider>,
    native_currency: String,
    fiat_currency: String,
    max_age: chrono::Duration,
    last_good: RwLock<Option<ExchangeRate>>,
}

impl ExchangeRateService {
    pub fn new(provider: Arc<dyn ExchangeRateProvider>, config: &EngineConfig) -> Self {
        Self {
            provider,
            native_currency: config.native_currency.clone(),
            fiat_currency: config.fiat_currency.clone(),
            max_age: config.rate_max_age(),
            last_good: RwLock::new(None),
        }
    }

    /// One fetch from the provider, with fallback to the last known rate.
    pub async fn current_rate(&self) -> Result<QuotedRate> {
        match self.fetch_pair().await {
            Ok(rate) => {
                if let Ok(mut last) = self.last_good.write() {
                    *last = Some(rate.clone());
                }

                let age = rate.age(Utc::now());
                if age > self.max_age {
                    warn!(
                        "{} rate from {} is {}s old",
                        rate.pair(),
                        rate.source,
                        age.num_seconds()
                    );
                    let reason = format!("rate observed {}s ago", age.num_seconds());
                    return Ok(QuotedRate::stale(rate, reason));
                }

                debug!("{} rate {} from {}", rate.pair(), rate.fiat_per_native, rate.source);
                Ok(QuotedRate::fresh(rate))
            }
            Err(e) => match self.last_known() {
                Some(previous) => {
                    warn!(
                        "Rate fetch failed, falling back to {} rate observed at {}: {}",
                        previous.pair(),
                        previous.observed_at,
                        e
                    );
                    Ok(QuotedRate::stale(previous, e.to_string()))
                }
                None => Err(e),
            },
        }
    }

    /// Last rate successfully fetched by this service, if any.
    pub fn last_known(&self) -> Option<ExchangeRate> {
        self.last_good.read().ok().and_then(|last| last.clone())
    }

    async fn fetch_pair(&self) -> Result<ExchangeRate> {
        let rates = self
            .provider
            .fetch(&self.native_currency, std::slice::from_ref(&self.fiat_currency))
            .await?;

        let rate = rates
            .into_iter()
            .find(|r| {
                r.base_currency == self.native_currency && r.quote_currency == self.fiat_currency
            })
            .ok_or_else(|| {
                Error::rate_unavailable(
                    format!(
                        "no {}/{} rate in feed reply",
                        self.native_currency, self.fiat_currency
                    ),
                    false,
                )
            })?;

        rate.validate()
            .map_err(|e| Error::rate_unavailable(e.to_string(), false))?;
        Ok(rate)
    }
}
