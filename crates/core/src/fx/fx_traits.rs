use async_trait::async_trait;

use super::fx_model::ExchangeRate;
use crate::errors::Result;

/// Trait for fetching current native/fiat conversion rates.
///
/// One call is one outbound network request. Failures surface as
/// `Error::RateUnavailable`; callers decide the fallback.
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Fetch the rate of `base` against each of the `quotes` currencies.
    async fn fetch(&self, base: &str, quotes: &[String]) -> Result<Vec<ExchangeRate>>;
}
