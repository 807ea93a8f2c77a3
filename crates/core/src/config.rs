//! Engine configuration.
//!
//! Values come from defaults, optionally overridden by `FUNDHUB_*` environment
//! variables (a `.env` file is honoured).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::{
    DEFAULT_BENEFICIARY_GAS_LIMIT, DEFAULT_DONATION_GAS_LIMIT, DEFAULT_NOTIFICATION_TTL_MS,
    DEFAULT_PAGE_SIZE, DEFAULT_RATE_MAX_AGE_SECS, DEFAULT_WITHDRAW_GAS_LIMIT,
};
use crate::errors::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Ledger currency symbol, priced by the feed (e.g. "ETH")
    pub native_currency: String,
    /// Display currency (e.g. "USD")
    pub fiat_currency: String,
    pub page_size: u32,
    pub donation_gas_limit: u64,
    pub withdraw_gas_limit: u64,
    pub beneficiary_gas_limit: u64,
    pub notification_ttl_ms: u64,
    pub rate_max_age_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            native_currency: "ETH".to_string(),
            fiat_currency: "USD".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            donation_gas_limit: DEFAULT_DONATION_GAS_LIMIT,
            withdraw_gas_limit: DEFAULT_WITHDRAW_GAS_LIMIT,
            beneficiary_gas_limit: DEFAULT_BENEFICIARY_GAS_LIMIT,
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            rate_max_age_secs: DEFAULT_RATE_MAX_AGE_SECS,
        }
    }
}

impl EngineConfig {
    /// Loads `.env` (if present) and applies `FUNDHUB_*` overrides on top of defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("FUNDHUB_NATIVE_CURRENCY") {
            config.native_currency = v.trim().to_uppercase();
        }
        if let Some(v) = lookup("FUNDHUB_FIAT_CURRENCY") {
            config.fiat_currency = v.trim().to_uppercase();
        }
        override_parsed(&lookup, "FUNDHUB_PAGE_SIZE", &mut config.page_size)?;
        override_parsed(
            &lookup,
            "FUNDHUB_DONATION_GAS_LIMIT",
            &mut config.donation_gas_limit,
        )?;
        override_parsed(
            &lookup,
            "FUNDHUB_WITHDRAW_GAS_LIMIT",
            &mut config.withdraw_gas_limit,
        )?;
        override_parsed(
            &lookup,
            "FUNDHUB_BENEFICIARY_GAS_LIMIT",
            &mut config.beneficiary_gas_limit,
        )?;
        override_parsed(
            &lookup,
            "FUNDHUB_NOTIFICATION_TTL_MS",
            &mut config.notification_ttl_ms,
        )?;
        override_parsed(
            &lookup,
            "FUNDHUB_RATE_MAX_AGE_SECS",
            &mut config.rate_max_age_secs,
        )?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.native_currency.is_empty() || self.fiat_currency.is_empty() {
            return Err(Error::Config("currency codes must not be empty".into()));
        }
        if self.native_currency == self.fiat_currency {
            return Err(Error::Config(format!(
                "native and fiat currency are both {}",
                self.native_currency
            )));
        }
        if self.page_size == 0 {
            return Err(Error::Config("page size must be at least 1".into()));
        }
        if self.donation_gas_limit == 0
            || self.withdraw_gas_limit == 0
            || self.beneficiary_gas_limit == 0
        {
            return Err(Error::Config("gas limits must be positive".into()));
        }
        if ttl_from_millis(self.notification_ttl_ms).is_none() {
            return Err(Error::Config(format!(
                "notification TTL of {}ms is out of range",
                self.notification_ttl_ms
            )));
        }
        if age_from_secs(self.rate_max_age_secs).is_none() {
            return Err(Error::Config(format!(
                "rate max age of {}s is out of range",
                self.rate_max_age_secs
            )));
        }
        Ok(())
    }

    /// Saturates at `TimeDelta::MAX` for configs that skipped `validate`.
    pub fn notification_ttl(&self) -> chrono::Duration {
        ttl_from_millis(self.notification_ttl_ms).unwrap_or(chrono::Duration::MAX)
    }

    /// Saturates at `TimeDelta::MAX` for configs that skipped `validate`.
    pub fn rate_max_age(&self) -> chrono::Duration {
        age_from_secs(self.rate_max_age_secs).unwrap_or(chrono::Duration::MAX)
    }
}

fn ttl_from_millis(ms: u64) -> Option<chrono::Duration> {
    i64::try_from(ms)
        .ok()
        .and_then(chrono::Duration::try_milliseconds)
}

fn age_from_secs(secs: u64) -> Option<chrono::Duration> {
    i64::try_from(secs).ok().and_then(chrono::Duration::try_seconds)
}

fn override_parsed<F, T>(lookup: &F, key: &str, target: &mut T) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        *target = raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{}='{}' is not a valid number", key, raw)))?;
    }
    Ok(())
}
