use log::{debug, error, warn};
use std::sync::{Arc, Mutex, RwLock};
use uuid::Uuid;

use super::catalog_model::{
    CardSync, CatalogFailure, CatalogOutcome, CatalogPage, CatalogState, RefreshTrigger,
};
use crate::config::EngineConfig;
use crate::errors::Result;
use crate::fundraisers::{CycleToken, FundraiserAggregator, ResyncStatus, SyncTracker};
use crate::fx::ExchangeRate;
use crate::ledger::{ActorIdentity, Address, CampaignRegistryBinding, PageRequest};
use crate::notifications::NotificationBus;

/// Drives the campaign listing through `Idle -> Loading -> {Ready, Failed}`.
///
/// Any trigger moves the state back to `Loading`. Each refresh carries a
/// sequence token; a result arriving after a newer refresh started is dropped.
/// At most one catalog error notification is active; it is dismissed once a
/// later cycle succeeds.
pub struct CatalogSynchronizer {
    registry: CampaignRegistryBinding,
    aggregator: Arc<FundraiserAggregator>,
    notifications: Arc<NotificationBus>,
    tracker: SyncTracker<Address>,
    state: RwLock<CatalogState>,
    error_notice: Mutex<Option<Uuid>>,
    page_size: u32,
}

impl CatalogSynchronizer {
    pub fn new(
        registry: CampaignRegistryBinding,
        aggregator: Arc<FundraiserAggregator>,
        notifications: Arc<NotificationBus>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            registry,
            aggregator,
            notifications,
            tracker: SyncTracker::new(),
            state: RwLock::new(CatalogState::Idle),
            error_notice: Mutex::new(None),
            page_size: config.page_size,
        }
    }

    /// First page with the configured page size.
    pub fn default_page(&self) -> PageRequest {
        PageRequest::first(self.page_size)
    }

    pub async fn refresh_default(&self, trigger: RefreshTrigger) -> Result<CatalogOutcome> {
        self.refresh(self.default_page(), trigger).await
    }

    /// Lists one page and reads the total count concurrently.
    ///
    /// Any failure replaces the visible state with `Failed`; a partial page is
    /// never kept or merged with the previous one.
    pub async fn refresh(
        &self,
        page: PageRequest,
        trigger: RefreshTrigger,
    ) -> Result<CatalogOutcome> {
        let token = self.tracker.begin(self.registry.factory().clone());
        debug!(
            "Catalog cycle {} ({:?}) for offset {} limit {}",
            token.seq(),
            trigger,
            page.offset,
            page.limit
        );
        self.tracker.apply_if_latest(&token, || self.set_state(CatalogState::Loading));

        let result = futures::try_join!(self.registry.list(page), self.registry.count());

        match result {
            Ok((addresses, total_count)) => {
                if addresses.len() as u64 > total_count {
                    debug!(
                        "Registry listed {} campaigns but counts {}",
                        addresses.len(),
                        total_count
                    );
                }
                let page = CatalogPage {
                    addresses,
                    total_count,
                    offset: page.offset,
                    limit: page.limit,
                };
                let applied = self.tracker.apply_if_latest(&token, || {
                    self.set_state(CatalogState::Ready(page.clone()));
                    self.clear_error_notice();
                });
                if applied.is_none() {
                    return Ok(superseded(&token));
                }
                Ok(CatalogOutcome::Applied(page))
            }
            Err(e) => {
                let applied = self.tracker.apply_if_latest(&token, || {
                    self.set_state(CatalogState::Failed(CatalogFailure {
                        message: e.to_string(),
                        retryable: e.is_retryable(),
                    }));
                    self.replace_error_notice(format!("Could not load campaigns: {}", e));
                });
                if applied.is_none() {
                    return Ok(superseded(&token));
                }
                error!("Catalog cycle {} failed: {}", token.seq(), e);
                Err(e)
            }
        }
    }

    pub fn state(&self) -> CatalogState {
        self.state
            .read()
            .map(|state| state.clone())
            .unwrap_or_default()
    }

    /// Aggregates every campaign of the current page concurrently.
    ///
    /// All cards share the same read-only `rate`. A failing card is reported
    /// in its own entry and does not affect the others. Returns nothing
    /// unless the catalog is `Ready`.
    pub async fn sync_cards(&self, rate: &ExchangeRate, actor: &ActorIdentity) -> Vec<CardSync> {
        let addresses = match self.state() {
            CatalogState::Ready(page) => page.addresses,
            _ => return Vec::new(),
        };

        let cycles = addresses.into_iter().map(|address| async move {
            let status = ResyncStatus::from(self.aggregator.refresh(&address, rate, actor).await);
            CardSync { address, status }
        });
        futures::future::join_all(cycles).await
    }

    fn set_state(&self, state: CatalogState) {
        if let Ok(mut current) = self.state.write() {
            *current = state;
        }
    }

    fn replace_error_notice(&self, message: String) {
        let notice = self.notifications.publish_error(message);
        if let Ok(mut current) = self.error_notice.lock() {
            if let Some(previous) = current.replace(notice.id) {
                self.notifications.dismiss(previous);
            }
        }
    }

    fn clear_error_notice(&self) {
        if let Ok(mut current) = self.error_notice.lock() {
            if let Some(previous) = current.take() {
                self.notifications.dismiss(previous);
            }
        }
    }
}

fn superseded(token: &CycleToken<Address>) -> CatalogOutcome {
    warn!("Dropping catalog cycle {}: superseded", token.seq());
    CatalogOutcome::Superseded { cycle: token.seq() }
}
