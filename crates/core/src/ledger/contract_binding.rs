use log::{debug, info, warn};
use std::sync::Arc;

use super::address::{ActorIdentity, Address, CampaignAddress};
use super::ledger_model::{
    ContractCall, ContractHandle, DonationHistory, FieldValue, ReadQuery, TransactionReceipt,
};
use super::ledger_traits::LedgerTransport;
use crate::config::EngineConfig;
use crate::errors::{Error, Result};

/// Typed read/write access to individual fundraiser records.
#[derive(Clone)]
pub struct LedgerContractBinding {
    transport: Arc<dyn LedgerTransport>,
    config: EngineConfig,
}

impl LedgerContractBinding {
    pub fn new(transport: Arc<dyn LedgerTransport>, config: EngineConfig) -> Self {
        Self { transport, config }
    }

    /// Binds a raw address string. Malformed input fails with `Binding`.
    pub fn bind(&self, raw: &str) -> Result<ContractHandle> {
        let address = Address::parse(raw).map_err(|e| Error::Binding(e.to_string()))?;
        Ok(ContractHandle::new(address))
    }

    /// Binds an address that was already validated.
    pub fn handle_for(&self, address: &CampaignAddress) -> ContractHandle {
        ContractHandle::new(address.clone())
    }

    pub async fn read(
        &self,
        handle: &ContractHandle,
        query: ReadQuery,
        from: Option<&ActorIdentity>,
    ) -> Result<FieldValue> {
        debug!("Reading {:?} from {}", query, handle.address());
        let value = self.transport.read(handle.address(), query, from).await?;
        Ok(value)
    }

    pub async fn read_text(&self, handle: &ContractHandle, query: ReadQuery) -> Result<String> {
        match self.read(handle, query, None).await? {
            FieldValue::Text(text) => Ok(text),
            other => Err(unexpected(handle, query, "text", &other)),
        }
    }

    pub async fn read_uint(&self, handle: &ContractHandle, query: ReadQuery) -> Result<u128> {
        match self.read(handle, query, None).await? {
            FieldValue::Uint(value) => Ok(value),
            other => Err(unexpected(handle, query, "uint", &other)),
        }
    }

    pub async fn read_address(&self, handle: &ContractHandle, query: ReadQuery) -> Result<Address> {
        match self.read(handle, query, None).await? {
            FieldValue::Address(raw) => Address::parse(&raw).map_err(|e| {
                Error::Decoding(format!("{:?} of {}: {}", query, handle.address(), e))
            }),
            other => Err(unexpected(handle, query, "address", &other)),
        }
    }

    /// Donation history of `actor` on this campaign.
    pub async fn read_donation_history(
        &self,
        handle: &ContractHandle,
        actor: &ActorIdentity,
    ) -> Result<DonationHistory> {
        let query = ReadQuery::MyDonations;
        match self.read(handle, query, Some(actor)).await? {
            FieldValue::DonationHistory(history) => {
                if history.values.len() != history.dates.len() {
                    return Err(Error::Decoding(format!(
                        "donation history of {} has {} values but {} dates",
                        handle.address(),
                        history.values.len(),
                        history.dates.len()
                    )));
                }
                Ok(history)
            }
            other => Err(unexpected(handle, query, "donation history", &other)),
        }
    }

    /// Submits `call` on behalf of `actor` with the configured gas ceiling.
    pub async fn write(
        &self,
        handle: &ContractHandle,
        call: ContractCall,
        actor: &ActorIdentity,
    ) -> Result<TransactionReceipt> {
        let gas_limit = self.gas_limit_for(&call);
        let name = call.name();
        info!(
            "Submitting {} on {} from {} (gas limit {})",
            name,
            handle.address(),
            actor,
            gas_limit
        );

        match self
            .transport
            .send(handle.address(), call, actor, gas_limit)
            .await
        {
            Ok(receipt) => {
                info!("{} on {} accepted: {}", name, handle.address(), receipt.tx_hash);
                Ok(receipt)
            }
            Err(e) => {
                warn!("{} on {} failed: {}", name, handle.address(), e);
                Err(e.into())
            }
        }
    }

    pub fn gas_limit_for(&self, call: &ContractCall) -> u64 {
        match call {
            ContractCall::Donate { .. } => self.config.donation_gas_limit,
            ContractCall::Withdraw => self.config.withdraw_gas_limit,
            ContractCall::SetBeneficiary { .. } => self.config.beneficiary_gas_limit,
        }
    }
}

fn unexpected(handle: &ContractHandle, query: ReadQuery, expected: &str, got: &FieldValue) -> Error {
    Error::Decoding(format!(
        "{:?} of {}: expected {}, got {}",
        query,
        handle.address(),
        expected,
        got.kind()
    ))
}
