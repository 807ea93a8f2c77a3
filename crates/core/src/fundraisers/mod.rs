//! Fundraisers module - snapshot models, the all-or-nothing aggregator and the
//! per-address sequence tracker that discards superseded cycles.

mod aggregator;
mod fundraisers_model;
mod sync_tracker;

#[cfg(test)]
mod aggregator_tests;

pub use aggregator::FundraiserAggregator;
pub use fundraisers_model::{
    DonationReceipt, DonationRecord, FundraiserSnapshot, FundraiserSyncState, FundraiserView,
    ResyncStatus, SyncOutcome,
};
pub use sync_tracker::{CycleToken, SyncTracker};
