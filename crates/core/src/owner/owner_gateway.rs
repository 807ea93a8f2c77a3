use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;

use crate::constants::{BENEFICIARY_SUCCESS_MESSAGE, WITHDRAW_SUCCESS_MESSAGE};
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::fundraisers::{FundraiserAggregator, ResyncStatus};
use crate::fx::ExchangeRate;
use crate::ledger::{
    ActorIdentity, Address, CampaignAddress, ContractCall, ReadQuery, TransactionReceipt,
};
use crate::notifications::{Notification, NotificationBus};

/// Result of an accepted owner action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerActionOutcome {
    pub receipt: TransactionReceipt,
    pub notification: Notification,
    #[serde(skip)]
    pub resync: ResyncStatus,
}

/// Authorizes and submits owner-only calls.
///
/// The acting identity is checked against the last known owner before any
/// write. A non-owner gets `Authorization` and nothing is sent.
pub struct OwnerActionGateway {
    aggregator: Arc<FundraiserAggregator>,
    events: Arc<dyn DomainEventSink>,
    notifications: Arc<NotificationBus>,
}

impl OwnerActionGateway {
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

    /// Sends the collected funds to the beneficiary.
    pub async fn withdraw(
        &self,
        address: &CampaignAddress,
        rate: &ExchangeRate,
        actor: &ActorIdentity,
        success_message: Option<&str>,
    ) -> Result<OwnerActionOutcome> {
        self.ensure_owner(address, actor).await?;

        let receipt = self.submit(address, ContractCall::Withdraw, actor).await?;
        self.events.emit(DomainEvent::funds_withdrawn(
            address.clone(),
            receipt.tx_hash.clone(),
        ));

        Ok(self
            .finish(
                address,
                rate,
                actor,
                receipt,
                success_message.unwrap_or(WITHDRAW_SUCCESS_MESSAGE),
            )
            .await)
    }

    /// Replaces the beneficiary with `new_beneficiary` after validating it.
    ///
    /// The input is checked exactly as given; surrounding whitespace is rejected.
    pub async fn set_beneficiary(
        &self,
        address: &CampaignAddress,
        new_beneficiary: &str,
        rate: &ExchangeRate,
        actor: &ActorIdentity,
        success_message: Option<&str>,
    ) -> Result<OwnerActionOutcome> {
        let beneficiary = Address::parse(new_beneficiary)?;
        self.ensure_owner(address, actor).await?;

        let call = ContractCall::SetBeneficiary {
            beneficiary: beneficiary.clone(),
        };
        let receipt = self.submit(address, call, actor).await?;
        self.events.emit(DomainEvent::beneficiary_changed(
            address.clone(),
            beneficiary,
            receipt.tx_hash.clone(),
        ));

        Ok(self
            .finish(
                address,
                rate,
                actor,
                receipt,
                success_message.unwrap_or(BENEFICIARY_SUCCESS_MESSAGE),
            )
            .await)
    }

    /// Fails with `Authorization` unless `actor` is exactly the campaign owner.
    ///
    /// Uses the owner from the latest applied snapshot, reading it from the
    /// ledger when the campaign was never aggregated.
    async fn ensure_owner(&self, address: &CampaignAddress, actor: &ActorIdentity) -> Result<()> {
        let owner = match self.aggregator.last_known_owner(address) {
            Some(owner) => owner,
            None => {
                let binding = self.aggregator.binding();
                binding
                    .read_address(&binding.handle_for(address), ReadQuery::Owner)
                    .await?
            }
        };

        if owner != *actor {
            warn!("{} attempted an owner action on {}", actor, address);
            return Err(Error::Authorization(format!(
                "{} is not the owner of {}",
                actor, address
            )));
        }
        Ok(())
    }

    async fn submit(
        &self,
        address: &CampaignAddress,
        call: ContractCall,
        actor: &ActorIdentity,
    ) -> Result<TransactionReceipt> {
        let binding = self.aggregator.binding();
        binding.write(&binding.handle_for(address), call, actor).await
    }

    async fn finish(
        &self,
        address: &CampaignAddress,
        rate: &ExchangeRate,
        actor: &ActorIdentity,
        receipt: TransactionReceipt,
        message: &str,
    ) -> OwnerActionOutcome {
        info!("Owner action on {} accepted: {}", address, receipt.tx_hash);
        let notification = self.notifications.publish_success(message);
        let resync = ResyncStatus::from(self.aggregator.refresh(address, rate, actor).await);

        OwnerActionOutcome {
            receipt,
            notification,
            resync,
        }
    }
}
