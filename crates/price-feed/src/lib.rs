//! Fundhub Price Feed Crate
//!
//! Provider-agnostic spot price fetching for converting a ledger's native
//! currency into fiat currencies.
//!
//! # Overview
//!
//! ```text
//! +------------------+     +---------------------+     +--------------+
//! |  Exchange rate   | --> |  PriceFeedProvider  | --> |  PriceQuote  |
//! |  service (core)  |     |  (CryptoCompare...) |     |  base/quote  |
//! +------------------+     +---------------------+     +--------------+
//! ```
//!
//! # Core Types
//!
//! - [`PriceFeedProvider`] - Trait implemented by every price source
//! - [`PriceQuote`] - One observed price for a currency pair
//! - [`PriceFeedError`] - Failures, classified by [`RetryClass`]

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{PriceFeedError, RetryClass};
pub use models::PriceQuote;
pub use provider::cryptocompare::CryptoCompareProvider;
pub use provider::PriceFeedProvider;
