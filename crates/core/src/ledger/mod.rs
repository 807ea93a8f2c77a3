//! Ledger module - addresses, the transport collaborator trait and the typed
//! contract/registry bindings built on top of it.

mod address;
mod contract_binding;
mod ledger_errors;
mod ledger_model;
mod ledger_traits;
mod registry_binding;
pub mod units;

pub use address::{ActorIdentity, Address, CampaignAddress};
pub use contract_binding::LedgerContractBinding;
pub use ledger_errors::LedgerError;
pub use ledger_model::{
    ContractCall, ContractHandle, DonationHistory, FieldValue, PageRequest, ReadQuery,
    TransactionReceipt,
};
pub use ledger_traits::LedgerTransport;
pub use registry_binding::CampaignRegistryBinding;
