//! Price feed models.

mod price_quote;

pub use price_quote::PriceQuote;
