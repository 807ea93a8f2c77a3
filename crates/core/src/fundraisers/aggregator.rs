use chrono::DateTime;
use log::{debug, error, warn};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::fundraisers_model::{
    DonationRecord, FundraiserSnapshot, FundraiserSyncState, FundraiserView, SyncOutcome,
};
use super::sync_tracker::{CycleToken, SyncTracker};
use crate::errors::{Error, Result};
use crate::fx::{native_to_fiat, ExchangeRate};
use crate::ledger::{
    units::wei_to_native, ActorIdentity, Address, CampaignAddress, DonationHistory,
    LedgerContractBinding, ReadQuery,
};

/// Builds consistent fundraiser views and keeps the latest one visible per campaign.
pub struct FundraiserAggregator {
    binding: LedgerContractBinding,
    tracker: SyncTracker<CampaignAddress>,
    states: RwLock<HashMap<CampaignAddress, FundraiserSyncState>>,
    owners: RwLock<HashMap<CampaignAddress, Address>>,
}

impl FundraiserAggregator {
    pub fn new(binding: LedgerContractBinding) -> Self {
        Self {
            binding,
            tracker: SyncTracker::new(),
            states: RwLock::new(HashMap::new()),
            owners: RwLock::new(HashMap::new()),
        }
    }

    /// Reads every field of `address` concurrently and composes one view.
    ///
    /// Either all reads succeed or the whole call fails with `Aggregation`;
    /// no field is ever defaulted.
    pub async fn aggregate(
        &self,
        address: &CampaignAddress,
        rate: &ExchangeRate,
        actor: &ActorIdentity,
    ) -> Result<FundraiserView> {
        rate.validate()?;
        let handle = self.binding.handle_for(address);
        let binding = &self.binding;

        let (name, description, image_url, url, count, total_wei, owner, beneficiary, history) =
            futures::try_join!(
                binding.read_text(&handle, ReadQuery::Name),
                binding.read_text(&handle, ReadQuery::Description),
                binding.read_text(&handle, ReadQuery::ImageUrl),
                binding.read_text(&handle, ReadQuery::Url),
                binding.read_uint(&handle, ReadQuery::DonationsCount),
                binding.read_uint(&handle, ReadQuery::TotalDonations),
                binding.read_address(&handle, ReadQuery::Owner),
                binding.read_address(&handle, ReadQuery::Beneficiary),
                binding.read_donation_history(&handle, actor),
            )
            .map_err(|e| Error::aggregation(address.as_str(), e))?;

        let compose = || -> Result<FundraiserView> {
            let donations_count = u64::try_from(count)
                .map_err(|_| Error::Decoding(format!("donations count {} out of range", count)))?;
            let total_donated_native = wei_to_native(total_wei)?;
            let total_donated_fiat = native_to_fiat(total_donated_native, rate)?;

            Ok(FundraiserView {
                is_owner: owner == *actor,
                snapshot: FundraiserSnapshot {
                    address: address.clone(),
                    name,
                    description,
                    image_url,
                    url,
                    donations_count,
                    total_donated_native,
                    total_donated_fiat,
                    owner_address: owner,
                    beneficiary,
                },
                donations: decode_history(history)?,
                rate: rate.clone(),
            })
        };

        compose().map_err(|e| Error::aggregation(address.as_str(), e))
    }

    /// Runs one synchronization cycle for `address`.
    ///
    /// The result is applied to the visible state only if no newer cycle for
    /// the same campaign was started in the meantime.
    pub async fn refresh(
        &self,
        address: &CampaignAddress,
        rate: &ExchangeRate,
        actor: &ActorIdentity,
    ) -> Result<SyncOutcome> {
        let token = self.tracker.begin(address.clone());
        debug!("Cycle {} started for {}", token.seq(), address);
        self.apply(&token, FundraiserSyncState::Loading);

        let result = self.aggregate(address, rate, actor).await;

        match result {
            Ok(view) => {
                let view = Arc::new(view);
                if !self.apply(&token, FundraiserSyncState::Ready(view.clone())) {
                    return Ok(self.superseded(&token));
                }
                Ok(SyncOutcome::Applied(view))
            }
            Err(e) => {
                let failed = FundraiserSyncState::Failed {
                    message: e.to_string(),
                };
                if !self.apply(&token, failed) {
                    return Ok(self.superseded(&token));
                }
                error!("Cycle {} for {} failed: {}", token.seq(), address, e);
                Err(e)
            }
        }
    }

    pub fn state(&self, address: &CampaignAddress) -> Option<FundraiserSyncState> {
        self.states
            .read()
            .ok()
            .and_then(|states| states.get(address).cloned())
    }

    /// The visible view of `address`, if its latest cycle succeeded.
    pub fn view(&self, address: &CampaignAddress) -> Option<Arc<FundraiserView>> {
        match self.state(address)? {
            FundraiserSyncState::Ready(view) => Some(view),
            _ => None,
        }
    }

    /// Owner seen by the most recently applied cycle, kept across later failures.
    pub fn last_known_owner(&self, address: &CampaignAddress) -> Option<Address> {
        self.owners
            .read()
            .ok()
            .and_then(|owners| owners.get(address).cloned())
    }

    pub fn binding(&self) -> &LedgerContractBinding {
        &self.binding
    }

    /// Makes `state` visible unless a newer cycle for the same campaign began.
    fn apply(&self, token: &CycleToken<CampaignAddress>, state: FundraiserSyncState) -> bool {
        let address = token.key();
        self.tracker
            .apply_if_latest(token, || {
                if let FundraiserSyncState::Ready(view) = &state {
                    if let Ok(mut owners) = self.owners.write() {
                        owners.insert(address.clone(), view.snapshot.owner_address.clone());
                    }
                }
                if let Ok(mut states) = self.states.write() {
                    states.insert(address.clone(), state);
                }
            })
            .is_some()
    }

    fn superseded(&self, token: &CycleToken<CampaignAddress>) -> SyncOutcome {
        warn!(
            "Dropping cycle {} for {}: superseded by cycle {:?}",
            token.seq(),
            token.key(),
            self.tracker.latest(token.key())
        );
        SyncOutcome::Superseded { cycle: token.seq() }
    }
}

fn decode_history(history: DonationHistory) -> Result<Vec<DonationRecord>> {
    history
        .values
        .into_iter()
        .zip(history.dates)
        .map(|(wei, secs)| {
            let date = i64::try_from(secs)
                .ok()
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .ok_or_else(|| Error::Decoding(format!("donation date {} out of range", secs)))?;
            Ok(DonationRecord {
                amount_native: wei_to_native(wei)?,
                date,
            })
        })
        .collect()
}
