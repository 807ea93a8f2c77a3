use log::{info, warn};
use std::sync::Arc;

use super::donations_model::{DonationIntent, DonationOutcome, DonationPreview};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::fundraisers::{FundraiserAggregator, ResyncStatus};
use crate::fx::ExchangeRate;
use crate::ledger::{ActorIdentity, CampaignAddress, ContractCall};
use crate::notifications::NotificationBus;

/// Submits donations and re-synchronizes the campaign afterwards.
pub struct DonationOrchestrator {
    aggregator: Arc<FundraiserAggregator>,
    events: Arc<dyn DomainEventSink>,
    notifications: Arc<NotificationBus>,
}

impl DonationOrchestrator {
    pub fn new(
        aggregator: Arc<FundraiserAggregator>,
        events: Arc<dyn DomainEventSink>,
        notifications: Arc<NotificationBus>,
    ) -> Self {
        Self {
            aggregator,
            events,
            notifications,
        }
    }

    /// Native amount the intent would transfer; used for live feedback while typing.
    pub fn preview(&self, intent: &DonationIntent, rate: &ExchangeRate) -> Result<DonationPreview> {
        intent.quote(rate)
    }

    /// Converts `intent` at `rate`, submits it and re-aggregates the campaign.
    ///
    /// Nothing is written when the rate or amount is invalid. Ledger failures
    /// are returned unchanged so the caller can keep the form open for retry.
    pub async fn donate(
        &self,
        address: &CampaignAddress,
        intent: &DonationIntent,
        rate: &ExchangeRate,
        actor: &ActorIdentity,
        success_message: Option<&str>,
    ) -> Result<DonationOutcome> {
        let preview = intent.quote(rate)?;
        let binding = self.aggregator.binding();
        let handle = binding.handle_for(address);

        let receipt = binding
            .write(
                &handle,
                ContractCall::Donate {
                    value_wei: preview.amount_wei,
                },
                actor,
            )
            .await?;
        info!(
            "Donation of {} {} ({} {}) to {} accepted",
            preview.amount_fiat,
            rate.quote_currency,
            preview.amount_native,
            rate.base_currency,
            address
        );

        self.events.emit(DomainEvent::donation_submitted(
            address.clone(),
            receipt.tx_hash.clone(),
            preview.amount_native,
        ));
        let notification = success_message.map(|m| self.notifications.publish_success(m));

        let resync = ResyncStatus::from(self.aggregator.refresh(address, rate, actor).await);
        if let ResyncStatus::Failed { message } = &resync {
            warn!("Donation to {} accepted but re-read failed: {}", address, message);
        }

        Ok(DonationOutcome {
            receipt,
            amount_fiat: preview.amount_fiat,
            amount_native: preview.amount_native,
            rate: rate.clone(),
            notification,
            resync,
        })
    }
}
