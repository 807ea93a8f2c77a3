//! FX module - native/fiat exchange rate model, provider trait, rate service
//! with staleness marking, and conversion helpers.

pub mod conversion;
mod fx_model;
mod fx_service;
mod fx_traits;
mod price_feed_provider;

pub use conversion::{fiat_to_native, format_fiat, native_to_fiat};
pub use fx_model::{ExchangeRate, QuotedRate, RateStatus};
pub use fx_service::ExchangeRateService;
pub use fx_traits::ExchangeRateProvider;
pub use price_feed_provider::PriceFeedRateProvider;
