use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Spot price of one unit of `base` expressed in `quote`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Currency being priced (e.g. "ETH")
    pub base: String,

    /// Currency the price is expressed in (e.g. "USD")
    pub quote: String,

    /// Units of `quote` per one unit of `base`
    pub price: Decimal,

    /// When the provider observed the price
    pub timestamp: DateTime<Utc>,

    /// Provider that produced the quote (CRYPTOCOMPARE, ...)
    pub source: String,
}

impl PriceQuote {
    pub fn new(
        base: impl Into<String>,
        quote: impl Into<String>,
        price: Decimal,
        timestamp: DateTime<Utc>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
            price,
            timestamp,
            source: source.into(),
        }
    }

    /// Pair key in `BASE/QUOTE` form.
    pub fn pair(&self) -> String {
        format!("{}/{}", self.base, self.quote)
    }
}
