//! Error types and retry classification for the price feed crate.

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur while fetching prices.
#[derive(Error, Debug)]
pub enum PriceFeedError {
    /// The provider does not know one of the requested symbols.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered, but with an error or an unexpected payload.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned a price that cannot be used (zero, negative, not finite).
    #[error("Invalid price for {symbol}: {message}")]
    InvalidPrice { symbol: String, message: String },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl PriceFeedError {
    /// Returns the retry classification for this error.
    ///
    /// ```
    /// use fundhub_price_feed::errors::{PriceFeedError, RetryClass};
    ///
    /// let error = PriceFeedError::RateLimited { provider: "CRYPTOCOMPARE".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::SymbolNotFound(_) | Self::InvalidPrice { .. } => RetryClass::Never,
            Self::RateLimited { .. } | Self::Timeout { .. } => RetryClass::WithBackoff,
            Self::ProviderError { .. } | Self::Network(_) => RetryClass::NextAttempt,
        }
    }
}
