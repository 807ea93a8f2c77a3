use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{Result, ValidationError};
use crate::fundraisers::ResyncStatus;
use crate::fx::{fiat_to_native, ExchangeRate};
use crate::ledger::{units::native_to_wei, TransactionReceipt};
use crate::notifications::Notification;

/// Amount the user typed, in fiat. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationIntent {
    pub amount_fiat: Decimal,
}

impl DonationIntent {
    pub fn new(amount_fiat: Decimal) -> Self {
        Self { amount_fiat }
    }

    /// Parses user input such as `"50"`, `"$1,250.50"` or `" 12.5 "`.
    pub fn parse(raw: &str) -> Result<Self> {
        let cleaned: String = raw
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',')
            .collect();
        if cleaned.is_empty() {
            return Err(ValidationError::InvalidAmount("donation amount is empty".into()).into());
        }
        let amount_fiat = Decimal::from_str(&cleaned).map_err(|_| {
            ValidationError::InvalidAmount(format!("'{}' is not a number", raw.trim()))
        })?;
        Ok(Self { amount_fiat })
    }

    /// Converts the intent at `rate` and checks it can be submitted.
    ///
    /// The rate is validated first. Zero or negative amounts, and amounts
    /// that round to zero wei, are rejected.
    pub fn quote(&self, rate: &ExchangeRate) -> Result<DonationPreview> {
        rate.validate()?;
        if self.amount_fiat <= Decimal::ZERO {
            return Err(ValidationError::InvalidAmount(format!(
                "donation must be greater than zero, got {}",
                self.amount_fiat
            ))
            .into());
        }

        let amount_native = fiat_to_native(self.amount_fiat, rate)?;
        let amount_wei = native_to_wei(amount_native)?;
        if amount_wei == 0 {
            return Err(ValidationError::InvalidAmount(format!(
                "{} {} is less than one wei",
                self.amount_fiat, rate.quote_currency
            ))
            .into());
        }

        Ok(DonationPreview {
            amount_fiat: self.amount_fiat,
            amount_native,
            amount_wei,
        })
    }
}

/// What a donation would transfer at the current rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationPreview {
    pub amount_fiat: Decimal,
    pub amount_native: Decimal,
    #[serde(with = "wei_string")]
    pub amount_wei: u128,
}

/// Result of an accepted donation.
#[derive(Debug, Clone)]
pub struct DonationOutcome {
    pub receipt: TransactionReceipt,
    pub amount_fiat: Decimal,
    pub amount_native: Decimal,
    pub rate: ExchangeRate,
    /// Present when the caller supplied a success message
    pub notification: Option<Notification>,
    pub resync: ResyncStatus,
}

mod wei_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
