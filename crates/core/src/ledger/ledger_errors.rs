use thiserror::Error;

/// Failures reported by the ledger transport collaborator.
///
/// Timeouts are the transport's responsibility and surface as `Transport`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Decoding(String),

    /// The ledger refused the call (insufficient funds, reverted require).
    #[error("{0}")]
    Rejected(String),

    /// The ledger reverted because the sender lacks a role (e.g. `onlyOwner`).
    #[error("{0}")]
    Unauthorized(String),
}
