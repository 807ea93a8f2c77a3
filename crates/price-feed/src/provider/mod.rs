//! Price feed provider abstraction and implementations.
//!
//! The core engine only depends on [`PriceFeedProvider`]; concrete HTTP
//! providers live in their own submodules.

mod traits;

pub mod cryptocompare;

pub use traits::PriceFeedProvider;
