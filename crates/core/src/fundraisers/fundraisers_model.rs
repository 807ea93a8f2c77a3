use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::constants::DESCRIPTION_PREVIEW_CHARS;
use crate::errors::Result;
use crate::fx::{native_to_fiat, ExchangeRate};
use crate::ledger::{Address, CampaignAddress};

/// Point-in-time read of one campaign plus its derived fiat value.
///
/// Replaced wholesale on every cycle, never patched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FundraiserSnapshot {
    pub address: CampaignAddress,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub url: String,
    pub donations_count: u64,
    pub total_donated_native: Decimal,
    pub total_donated_fiat: Decimal,
    pub owner_address: Address,
    /// Account that receives the funds on withdraw
    pub beneficiary: Address,
}

impl FundraiserSnapshot {
    /// Description cut to `max_chars` characters, with an ellipsis when truncated.
    pub fn summary(&self, max_chars: usize) -> String {
        if self.description.chars().count() <= max_chars {
            return self.description.clone();
        }
        let cut: String = self.description.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }

    /// Description as shown on a catalog card.
    pub fn preview(&self) -> String {
        self.summary(DESCRIPTION_PREVIEW_CHARS)
    }
}

/// One donation made by the acting identity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationRecord {
    pub amount_native: Decimal,
    pub date: DateTime<Utc>,
}

impl DonationRecord {
    pub fn amount_fiat(&self, rate: &ExchangeRate) -> Result<Decimal> {
        native_to_fiat(self.amount_native, rate)
    }

    /// Data needed to request a receipt for this donation.
    pub fn receipt(&self, fund_name: &str, rate: &ExchangeRate) -> Result<DonationReceipt> {
        Ok(DonationReceipt {
            fund_name: fund_name.to_string(),
            amount_native: self.amount_native,
            amount_fiat: self.amount_fiat(rate)?,
            fiat_currency: rate.quote_currency.clone(),
            date: self.date,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationReceipt {
    pub fund_name: String,
    pub amount_native: Decimal,
    pub amount_fiat: Decimal,
    pub fiat_currency: String,
    pub date: DateTime<Utc>,
}

/// Everything one aggregation cycle produced for a campaign card.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FundraiserView {
    pub snapshot: FundraiserSnapshot,
    /// The acting identity's donations, in ledger order
    pub donations: Vec<DonationRecord>,
    pub is_owner: bool,
    /// Rate the fiat figures were derived with
    pub rate: ExchangeRate,
}

/// Visible state of one campaign.
#[derive(Debug, Clone, PartialEq)]
pub enum FundraiserSyncState {
    Loading,
    Ready(Arc<FundraiserView>),
    /// Persistent until the next cycle for this campaign is applied.
    Failed { message: String },
}

/// What happened to the result of a refresh cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Applied(Arc<FundraiserView>),
    /// A newer cycle for the same campaign was started; this result was dropped.
    Superseded { cycle: u64 },
}

impl SyncOutcome {
    pub fn applied(&self) -> Option<&Arc<FundraiserView>> {
        match self {
            SyncOutcome::Applied(view) => Some(view),
            SyncOutcome::Superseded { .. } => None,
        }
    }
}

/// Result of the re-aggregation that follows an accepted mutation.
///
/// A failed re-read never undoes the mutation; it is reported here instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ResyncStatus {
    Applied(Arc<FundraiserView>),
    Superseded,
    Failed { message: String },
}

impl ResyncStatus {
    pub fn view(&self) -> Option<&Arc<FundraiserView>> {
        match self {
            ResyncStatus::Applied(view) => Some(view),
            _ => None,
        }
    }
}

impl From<Result<SyncOutcome>> for ResyncStatus {
    fn from(result: Result<SyncOutcome>) -> Self {
        match result {
            Ok(SyncOutcome::Applied(view)) => ResyncStatus::Applied(view),
            Ok(SyncOutcome::Superseded { .. }) => ResyncStatus::Superseded,
            Err(e) => ResyncStatus::Failed {
                message: e.to_string(),
            },
        }
    }
}
