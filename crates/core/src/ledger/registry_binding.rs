use log::debug;
use std::sync::Arc;

use super::address::{Address, CampaignAddress};
use super::ledger_model::{FieldValue, PageRequest, ReadQuery};
use super::ledger_traits::LedgerTransport;
use crate::errors::{Error, Result};

/// Enumerates campaigns created by one factory record.
///
/// `list` and `count` are independent point-in-time reads. Their results are
/// not reconciled: the registry may change between the two calls.
#[derive(Clone)]
pub struct CampaignRegistryBinding {
    transport: Arc<dyn LedgerTransport>,
    factory: Address,
}

impl CampaignRegistryBinding {
    pub fn new(transport: Arc<dyn LedgerTransport>, factory: Address) -> Self {
        Self { transport, factory }
    }

    pub fn factory(&self) -> &Address {
        &self.factory
    }

    /// Campaign addresses of one page, in creation order.
    pub async fn list(&self, page: PageRequest) -> Result<Vec<CampaignAddress>> {
        debug!(
            "Listing campaigns of {} (offset {}, limit {})",
            self.factory, page.offset, page.limit
        );
        let query = ReadQuery::Fundraisers {
            limit: page.limit,
            offset: page.offset,
        };

        match self.transport.read(&self.factory, query, None).await? {
            FieldValue::AddressList(raw) => raw
                .iter()
                .map(|entry| {
                    Address::parse(entry).map_err(|e| {
                        Error::Decoding(format!("campaign list of {}: {}", self.factory, e))
                    })
                })
                .collect(),
            other => Err(Error::Decoding(format!(
                "campaign list of {}: expected address[], got {}",
                self.factory,
                other.kind()
            ))),
        }
    }

    /// Number of campaigns the factory has ever created.
    pub async fn count(&self) -> Result<u64> {
        match self
            .transport
            .read(&self.factory, ReadQuery::FundraisersCount, None)
            .await?
        {
            FieldValue::Uint(count) => u64::try_from(count).map_err(|_| {
                Error::Decoding(format!(
                    "campaign count {} of {} out of range",
                    count, self.factory
                ))
            }),
            other => Err(Error::Decoding(format!(
                "campaign count of {}: expected uint, got {}",
                self.factory,
                other.kind()
            ))),
        }
    }
}
