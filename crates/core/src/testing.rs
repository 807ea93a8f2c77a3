//! Shared mock collaborators for unit tests.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::fx::{ExchangeRate, ExchangeRateProvider};
use crate::ledger::{
    ActorIdentity, Address, ContractCall, DonationHistory, FieldValue, LedgerError,
    LedgerTransport, ReadQuery, TransactionReceipt,
};

pub const CAMPAIGN: &str = "0x1111111111111111111111111111111111111111";
pub const CAMPAIGN_B: &str = "0x2222222222222222222222222222222222222222";
pub const FACTORY: &str = "0xfAc7000000000000000000000000000000000001";
pub const OWNER: &str = "0xAbCdEf0123456789aBcDeF0123456789AbCdEf01";
pub const DONOR: &str = "0xd0d0000000000000000000000000000000000042";
pub const NEW_BENEFICIARY: &str = "0xBeeF00000000000000000000000000000000BEEF";

pub const WEI_PER_NATIVE: u128 = 1_000_000_000_000_000_000;

pub fn addr(raw: &str) -> Address {
    Address::parse(raw).unwrap()
}

pub fn rate(fiat_per_native: Decimal) -> ExchangeRate {
    ExchangeRate::new("ETH", "USD", fiat_per_native, Utc::now(), "TEST").unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerErrorKind {
    Transport,
    Decoding,
    Rejected,
    Unauthorized,
}

impl LedgerErrorKind {
    fn to_error(self, context: &str) -> LedgerError {
        match self {
            LedgerErrorKind::Transport => LedgerError::Transport(format!("{}: node unreachable", context)),
            LedgerErrorKind::Decoding => LedgerError::Decoding(format!("{}: bad reply", context)),
            LedgerErrorKind::Rejected => LedgerError::Rejected(format!("{}: reverted", context)),
            LedgerErrorKind::Unauthorized => {
                LedgerError::Unauthorized(format!("{}: caller is not the owner", context))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SentCall {
    pub contract: String,
    pub call: ContractCall,
    pub from: String,
    pub gas_limit: u64,
}

/// In-memory ledger. Accepted donations update the campaign's counters so
/// re-aggregation observes the new state.
#[derive(Default)]
pub struct MockLedger {
    fields: Mutex<HashMap<(String, ReadQuery), FieldValue>>,
    registries: Mutex<HashMap<String, (Vec<String>, u128)>>,
    read_failures: Mutex<HashMap<(String, ReadQuery), LedgerErrorKind>>,
    send_failure: Mutex<Option<LedgerErrorKind>>,
    gates: Mutex<HashMap<(String, ReadQuery), Arc<Notify>>>,
    sent: Mutex<Vec<SentCall>>,
    reads: Mutex<Vec<(String, ReadQuery, Option<String>)>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a campaign with 3 donations totalling 1.5 native; the acting
    /// donor's history holds 1.0 and 0.5.
    pub fn seed_campaign(&self, campaign: &str, owner: &str) {
        let fields = [
            (ReadQuery::Name, FieldValue::Text("Clean Water".to_string())),
            (
                ReadQuery::Description,
                FieldValue::Text(
                    "Bringing clean drinking water to rural communities across the region."
                        .to_string(),
                ),
            ),
            (
                ReadQuery::ImageUrl,
                FieldValue::Text("https://example.org/water.png".to_string()),
            ),
            (
                ReadQuery::Url,
                FieldValue::Text("https://example.org/water".to_string()),
            ),
            (ReadQuery::DonationsCount, FieldValue::Uint(3)),
            (
                ReadQuery::TotalDonations,
                FieldValue::Uint(3 * WEI_PER_NATIVE / 2),
            ),
            (ReadQuery::Owner, FieldValue::Address(owner.to_string())),
            (ReadQuery::Beneficiary, FieldValue::Address(owner.to_string())),
            (
                ReadQuery::MyDonations,
                FieldValue::DonationHistory(DonationHistory {
                    values: vec![WEI_PER_NATIVE, WEI_PER_NATIVE / 2],
                    dates: vec![1_700_000_000, 1_700_086_400],
                }),
            ),
        ];
        let mut map = self.fields.lock().unwrap();
        for (query, value) in fields {
            map.insert((campaign.to_string(), query), value);
        }
    }

    pub fn seed_registry(&self, factory: &str, campaigns: &[&str], count: u128) {
        self.registries.lock().unwrap().insert(
            factory.to_string(),
            (campaigns.iter().map(|c| c.to_string()).collect(), count),
        );
    }

    pub fn set_field(&self, contract: &str, query: ReadQuery, value: FieldValue) {
        self.fields
            .lock()
            .unwrap()
            .insert((contract.to_string(), query), value);
    }

    pub fn fail_read(&self, contract: &str, query: ReadQuery, kind: LedgerErrorKind) {
        self.read_failures
            .lock()
            .unwrap()
            .insert((contract.to_string(), query), kind);
    }

    pub fn clear_read_failures(&self) {
        self.read_failures.lock().unwrap().clear();
    }

    pub fn fail_sends_with(&self, kind: LedgerErrorKind) {
        *self.send_failure.lock().unwrap() = Some(kind);
    }

    pub fn clear_send_failure(&self) {
        *self.send_failure.lock().unwrap() = None;
    }

    /// Holds the next read of `query` on `contract` until the returned handle is notified.
    pub fn gate(&self, contract: &str, query: ReadQuery) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert((contract.to_string(), query), notify.clone());
        notify
    }

    pub fn sent(&self) -> Vec<SentCall> {
        self.sent.lock().unwrap().clone()
    }

    pub fn reads(&self) -> Vec<(String, ReadQuery, Option<String>)> {
        self.reads.lock().unwrap().clone()
    }

    fn registry_read(&self, contract: &str, query: ReadQuery) -> Option<FieldValue> {
        let registries = self.registries.lock().unwrap();
        let (campaigns, count) = registries.get(contract)?;
        match query {
            ReadQuery::Fundraisers { limit, offset } => Some(FieldValue::AddressList(
                campaigns
                    .iter()
                    .skip(offset as usize)
                    .take(limit as usize)
                    .cloned()
                    .collect(),
            )),
            ReadQuery::FundraisersCount => Some(FieldValue::Uint(*count)),
            _ => None,
        }
    }

    fn apply(&self, contract: &str, call: &ContractCall) {
        let mut fields = self.fields.lock().unwrap();
        match call {
            ContractCall::Donate { value_wei } => {
                if let Some(FieldValue::Uint(count)) =
                    fields.get_mut(&(contract.to_string(), ReadQuery::DonationsCount))
                {
                    *count += 1;
                }
                if let Some(FieldValue::Uint(total)) =
                    fields.get_mut(&(contract.to_string(), ReadQuery::TotalDonations))
                {
                    *total += value_wei;
                }
            }
            ContractCall::SetBeneficiary { beneficiary } => {
                fields.insert(
                    (contract.to_string(), ReadQuery::Beneficiary),
                    FieldValue::Address(beneficiary.to_string()),
                );
            }
            ContractCall::Withdraw => {}
        }
    }
}

#[async_trait]
impl LedgerTransport for MockLedger {
    async fn read(
        &self,
        contract: &Address,
        query: ReadQuery,
        from: Option<&ActorIdentity>,
    ) -> std::result::Result<FieldValue, LedgerError> {
        let key = (contract.to_string(), query);
        let gate = self.gates.lock().unwrap().remove(&key);
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.reads.lock().unwrap().push((
            contract.to_string(),
            query,
            from.map(|f| f.to_string()),
        ));

        let failure = self.read_failures.lock().unwrap().get(&key).copied();
        if let Some(kind) = failure {
            return Err(kind.to_error(&format!("{:?}", query)));
        }

        if let Some(value) = self.registry_read(contract.as_str(), query) {
            return Ok(value);
        }

        let value = self.fields.lock().unwrap().get(&key).cloned();
        value.ok_or_else(|| {
            LedgerError::Decoding(format!("no {:?} field on {}", query, contract))
        })
    }

    async fn send(
        &self,
        contract: &Address,
        call: ContractCall,
        from: &ActorIdentity,
        gas_limit: u64,
    ) -> std::result::Result<TransactionReceipt, LedgerError> {
        let failure = *self.send_failure.lock().unwrap();
        if let Some(kind) = failure {
            return Err(kind.to_error(call.name()));
        }

        self.apply(contract.as_str(), &call);
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentCall {
            contract: contract.to_string(),
            call,
            from: from.to_string(),
            gas_limit,
        });

        Ok(TransactionReceipt {
            tx_hash: format!("0x{:064x}", sent.len()),
            block_number: Some(100 + sent.len() as u64),
            gas_used: gas_limit / 2,
        })
    }
}

/// Rate provider that replays scripted answers, repeating the last one.
#[derive(Default)]
pub struct MockRateProvider {
    answers: Mutex<VecDeque<std::result::Result<ExchangeRate, String>>>,
    calls: Mutex<usize>,
}

impl MockRateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_rate(&self, rate: ExchangeRate) {
        self.answers.lock().unwrap().push_back(Ok(rate));
    }

    pub fn push_failure(&self, message: &str) {
        self.answers
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ExchangeRateProvider for MockRateProvider {
    async fn fetch(&self, _base: &str, _quotes: &[String]) -> Result<Vec<ExchangeRate>> {
        *self.calls.lock().unwrap() += 1;
        let mut answers = self.answers.lock().unwrap();
        let answer = if answers.len() > 1 {
            answers.pop_front()
        } else {
            answers.front().cloned()
        };
        match answer {
            Some(Ok(rate)) => Ok(vec![rate]),
            Some(Err(message)) => Err(Error::rate_unavailable(message, true)),
            None => Err(Error::rate_unavailable("no scripted rate", true)),
        }
    }
}

/// Collects emitted domain events in memory.
#[derive(Default)]
pub struct MockDomainEventSink {
    events: Mutex<Vec<DomainEvent>>,
}

impl MockDomainEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.events.lock().unwrap().push(event);
    }
}
