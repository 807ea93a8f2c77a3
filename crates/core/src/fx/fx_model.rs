use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Units of fiat per one unit of the native currency, as observed by a price feed.
///
/// A best-effort, replaceable value: never assumed monotonic or strictly fresh.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub base_currency: String,
    pub quote_currency: String,
    #[serde(serialize_with = "serialize_decimal_6")]
    pub fiat_per_native: Decimal,
    pub observed_at: DateTime<Utc>,
    pub source: String,
}

impl ExchangeRate {
    pub fn new(
        base_currency: impl Into<String>,
        quote_currency: impl Into<String>,
        fiat_per_native: Decimal,
        observed_at: DateTime<Utc>,
        source: impl Into<String>,
    ) -> Result<Self> {
        let rate = Self {
            base_currency: base_currency.into(),
            quote_currency: quote_currency.into(),
            fiat_per_native,
            observed_at,
            source: source.into(),
        };
        rate.validate()?;
        Ok(rate)
    }

    /// Rejects zero and negative rates.
    pub fn validate(&self) -> Result<()> {
        if self.fiat_per_native <= Decimal::ZERO {
            return Err(Error::InvalidRate(format!(
                "{}/{} rate must be positive, got {}",
                self.base_currency, self.quote_currency, self.fiat_per_native
            )));
        }
        Ok(())
    }

    /// Pair key in `BASE/QUOTE` form.
    pub fn pair(&self) -> String {
        format!("{}/{}", self.base_currency, self.quote_currency)
    }

    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.observed_at
    }
}

fn serialize_decimal_6<S>(decimal: &Decimal, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let rounded = decimal.round_dp(6);
    serializer.serialize_str(&rounded.to_string())
}

/// Freshness of a rate handed to consumers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RateStatus {
    Fresh,
    /// Conversion is degraded: the rate is the last known one or too old.
    Stale { reason: String },
}

/// A rate together with its freshness, as returned by the rate service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuotedRate {
    pub rate: ExchangeRate,
    pub status: RateStatus,
}

impl QuotedRate {
    pub fn fresh(rate: ExchangeRate) -> Self {
        Self {
            rate,
            status: RateStatus::Fresh,
        }
    }

    pub fn stale(rate: ExchangeRate, reason: impl Into<String>) -> Self {
        Self {
            rate,
            status: RateStatus::Stale {
                reason: reason.into(),
            },
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.status, RateStatus::Stale { .. })
    }
}
