//! Core error types for the Fundhub engine.
//!
//! Collaborator errors (ledger transport, price feed) are converted into these
//! variants at the binding layer so that callers only ever match on one enum.

use fundhub_price_feed::{PriceFeedError, RetryClass};
use thiserror::Error;

use crate::ledger::LedgerError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
#[derive(Error, Debug)]
pub enum Error {
    /// The campaign address could not be bound to a contract handle.
    #[error("Failed to bind contract: {0}")]
    Binding(String),

    /// Network or node unavailable, including transport timeouts.
    #[error("Ledger transport failed: {0}")]
    Transport(String),

    /// The ledger answered with a value of an unexpected shape.
    #[error("Failed to decode ledger reply: {0}")]
    Decoding(String),

    /// The ledger refused the transaction (insufficient funds, reverted precondition).
    #[error("Transaction rejected: {0}")]
    Rejected(String),

    /// The acting identity lacks the role required for the operation.
    #[error("Not authorized: {0}")]
    Authorization(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The price feed could not produce a rate. Never treated as a rate of 1.
    ///
    /// `retryable` is false when the feed refused the request itself (unknown
    /// symbol, unusable price), so asking again would get the same answer.
    #[error("Exchange rate unavailable: {message}")]
    RateUnavailable { message: String, retryable: bool },

    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    /// A composed read failed; no partial snapshot was produced.
    #[error("Failed to aggregate fundraiser {address}: {source}")]
    Aggregation {
        address: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Invalid configuration value: {0}")]
    Config(String),
}

impl Error {
    /// Wraps a read failure for the given campaign.
    pub fn aggregation(address: impl Into<String>, source: Error) -> Self {
        Error::Aggregation {
            address: address.into(),
            source: Box::new(source),
        }
    }

    pub fn rate_unavailable(message: impl Into<String>, retryable: bool) -> Self {
        Error::RateUnavailable {
            message: message.into(),
            retryable,
        }
    }

    /// The innermost error, looking through aggregation wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Aggregation { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Whether repeating the same request later may succeed.
    pub fn is_retryable(&self) -> bool {
        match self.root_cause() {
            Error::Transport(_) => true,
            Error::RateUnavailable { retryable, .. } => *retryable,
            _ => false,
        }
    }
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("'{0}' is not a valid ledger address")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

// === From implementations for collaborator error types ===

impl From<LedgerError> for Error {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Transport(msg) => Error::Transport(msg),
            LedgerError::Decoding(msg) => Error::Decoding(msg),
            LedgerError::Rejected(msg) => Error::Rejected(msg),
            LedgerError::Unauthorized(msg) => Error::Authorization(msg),
        }
    }
}

impl From<PriceFeedError> for Error {
    fn from(err: PriceFeedError) -> Self {
        let retryable = err.retry_class() != RetryClass::Never;
        Error::rate_unavailable(err.to_string(), retryable)
    }
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
