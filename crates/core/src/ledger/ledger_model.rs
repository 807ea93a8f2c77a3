use serde::{Deserialize, Serialize};

use super::address::{Address, CampaignAddress};
use crate::constants::DEFAULT_PAGE_SIZE;

/// Point-in-time queries understood by fundraiser and factory records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadQuery {
    Name,
    Description,
    ImageUrl,
    Url,
    DonationsCount,
    /// Total donated, in wei
    TotalDonations,
    Owner,
    Beneficiary,
    /// Donation history of the calling account
    MyDonations,
    /// Factory: campaign addresses in creation order
    Fundraisers { limit: u32, offset: u32 },
    /// Factory: number of campaigns ever created
    FundraisersCount,
}

/// Raw decoded value returned by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Uint(u128),
    Address(String),
    AddressList(Vec<String>),
    DonationHistory(DonationHistory),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Uint(_) => "uint",
            FieldValue::Address(_) => "address",
            FieldValue::AddressList(_) => "address[]",
            FieldValue::DonationHistory(_) => "donation history",
        }
    }
}

/// Parallel arrays as returned by `myDonations()`: amounts in wei and unix timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DonationHistory {
    pub values: Vec<u128>,
    pub dates: Vec<u64>,
}

/// State-changing calls on a fundraiser record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    /// Payable donation carrying `value_wei`
    Donate { value_wei: u128 },
    Withdraw,
    SetBeneficiary { beneficiary: Address },
}

impl ContractCall {
    pub fn name(&self) -> &'static str {
        match self {
            ContractCall::Donate { .. } => "donate",
            ContractCall::Withdraw => "withdraw",
            ContractCall::SetBeneficiary { .. } => "setBeneficiary",
        }
    }
}

/// Result of an accepted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub tx_hash: String,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// A campaign address that has been validated and bound for reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractHandle {
    address: CampaignAddress,
}

impl ContractHandle {
    pub(crate) fn new(address: CampaignAddress) -> Self {
        Self { address }
    }

    pub fn address(&self) -> &CampaignAddress {
        &self.address
    }
}

/// One page of the campaign registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub offset: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    pub fn first(limit: u32) -> Self {
        Self { offset: 0, limit }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}
