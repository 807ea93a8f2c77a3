use async_trait::async_trait;

use super::address::{ActorIdentity, Address};
use super::ledger_errors::LedgerError;
use super::ledger_model::{ContractCall, FieldValue, ReadQuery, TransactionReceipt};

/// Trait for the ledger client/RPC collaborator.
///
/// Implementations own the network transport, ABI encoding and timeouts.
#[async_trait]
pub trait LedgerTransport: Send + Sync {
    /// Point-in-time query against the record at `contract`. Never mutates state.
    ///
    /// `from` sets the caller for queries scoped to `msg.sender`.
    async fn read(
        &self,
        contract: &Address,
        query: ReadQuery,
        from: Option<&ActorIdentity>,
    ) -> Result<FieldValue, LedgerError>;

    /// Submits a state-changing call and suspends until the ledger accepts or rejects it.
    async fn send(
        &self,
        contract: &Address,
        call: ContractCall,
        from: &ActorIdentity,
        gas_limit: u64,
    ) -> Result<TransactionReceipt, LedgerError>;
}
