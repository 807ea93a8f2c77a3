//! Domain event types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{Address, CampaignAddress};

/// Facts about accepted ledger mutations.
///
/// Emitted once per accepted transaction, before the follow-up
/// re-aggregation, so a listener never waits on a slow read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A donation was accepted by the ledger.
    DonationSubmitted {
        address: CampaignAddress,
        tx_hash: String,
        amount_native: Decimal,
    },

    /// The owner withdrew the collected funds to the beneficiary.
    FundsWithdrawn {
        address: CampaignAddress,
        tx_hash: String,
    },

    BeneficiaryChanged {
        address: CampaignAddress,
        beneficiary: Address,
        tx_hash: String,
    },
}

impl DomainEvent {
    pub fn donation_submitted(
        address: CampaignAddress,
        tx_hash: impl Into<String>,
        amount_native: Decimal,
    ) -> Self {
        Self::DonationSubmitted {
            address,
            tx_hash: tx_hash.into(),
            amount_native,
        }
    }

    pub fn funds_withdrawn(address: CampaignAddress, tx_hash: impl Into<String>) -> Self {
        Self::FundsWithdrawn {
            address,
            tx_hash: tx_hash.into(),
        }
    }

    pub fn beneficiary_changed(
        address: CampaignAddress,
        beneficiary: Address,
        tx_hash: impl Into<String>,
    ) -> Self {
        Self::BeneficiaryChanged {
            address,
            beneficiary,
            tx_hash: tx_hash.into(),
        }
    }

    /// The campaign the event is about.
    pub fn address(&self) -> &CampaignAddress {
        match self {
            Self::DonationSubmitted { address, .. }
            | Self::FundsWithdrawn { address, .. }
            | Self::BeneficiaryChanged { address, .. } => address,
        }
    }

    pub fn tx_hash(&self) -> &str {
        match self {
            Self::DonationSubmitted { tx_hash, .. }
            | Self::FundsWithdrawn { tx_hash, .. }
            | Self::BeneficiaryChanged { tx_hash, .. } => tx_hash,
        }
    }
}
