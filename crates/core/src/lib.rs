//! Fundhub Core - fundraiser state synchronization and donation orchestration.
//!
//! This crate turns campaign addresses into consistent, fiat-valued views of
//! their on-ledger state, submits donations and owner actions, and keeps a
//! paginated catalog of campaigns in sync. The ledger transport and the price
//! feed are collaborators behind the [`ledger::LedgerTransport`] and
//! [`fx::ExchangeRateProvider`] traits.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod donations;
pub mod errors;
pub mod events;
pub mod fundraisers;
pub mod fx;
pub mod ledger;
pub mod notifications;
pub mod owner;

#[cfg(test)]
mod testing;

pub use config::EngineConfig;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
