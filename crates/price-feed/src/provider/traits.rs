//! Price feed provider trait definition.

use async_trait::async_trait;

use crate::errors::PriceFeedError;
use crate::models::PriceQuote;

/// Trait for spot price sources.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use fundhub_price_feed::{PriceFeedError, PriceFeedProvider, PriceQuote};
///
/// struct FixedFeed;
///
/// #[async_trait]
/// impl PriceFeedProvider for FixedFeed {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn latest_prices(
///         &self,
///         base: &str,
///         quotes: &[String],
///     ) -> Result<Vec<PriceQuote>, PriceFeedError> {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait PriceFeedProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and quote sources.
    fn id(&self) -> &'static str;

    /// Fetch the latest price of `base` in each of the `quotes` currencies.
    ///
    /// Every requested quote currency must be present in the result; a
    /// provider that cannot price one of them fails the whole call.
    async fn latest_prices(
        &self,
        base: &str,
        quotes: &[String],
    ) -> Result<Vec<PriceQuote>, PriceFeedError>;
}
