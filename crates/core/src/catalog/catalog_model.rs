use serde::{Deserialize, Serialize};

use crate::fundraisers::ResyncStatus;
use crate::ledger::CampaignAddress;

/// One listing of the registry, built fresh on every refresh.
///
/// `total_count` is reported as read, even when it disagrees with the number
/// of addresses returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub addresses: Vec<CampaignAddress>,
    pub total_count: u64,
    pub offset: u32,
    pub limit: u32,
}

impl CatalogPage {
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Whether the registry reports campaigns past this page.
    pub fn has_more(&self) -> bool {
        (self.offset as u64) + (self.addresses.len() as u64) < self.total_count
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFailure {
    pub message: String,
    pub retryable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogState {
    #[default]
    Idle,
    Loading,
    Ready(CatalogPage),
    Failed(CatalogFailure),
}

impl CatalogState {
    /// True only for a successful load with no campaigns; a failure is never "empty".
    pub fn is_empty(&self) -> bool {
        matches!(self, CatalogState::Ready(page) if page.is_empty())
    }

    pub fn page(&self) -> Option<&CatalogPage> {
        match self {
            CatalogState::Ready(page) => Some(page),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CatalogState::Failed(_))
    }
}

/// What caused a catalog refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshTrigger {
    InitialMount,
    Explicit,
    /// After an accepted donation or owner action
    PostAction,
}

/// What happened to the result of a catalog refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOutcome {
    Applied(CatalogPage),
    Superseded { cycle: u64 },
}

/// Card-level synchronization result for one listed campaign.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSync {
    pub address: CampaignAddress,
    pub status: ResyncStatus,
}
