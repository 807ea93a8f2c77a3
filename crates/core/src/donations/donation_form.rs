use log::debug;

use super::donation_orchestrator::DonationOrchestrator;
use super::donations_model::{DonationIntent, DonationOutcome, DonationPreview};
use crate::errors::Result;
use crate::fx::ExchangeRate;
use crate::ledger::{ActorIdentity, CampaignAddress};

/// State of the donation dialog for one campaign.
///
/// A failed submission leaves the dialog open with the typed amount intact
/// and the error recorded; only a successful one closes and clears it.
#[derive(Debug, Clone)]
pub struct DonationForm {
    address: CampaignAddress,
    open: bool,
    input: String,
    preview: Option<DonationPreview>,
    last_error: Option<String>,
}

impl DonationForm {
    pub fn new(address: CampaignAddress) -> Self {
        Self {
            address,
            open: false,
            input: String::new(),
            preview: None,
            last_error: None,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the dialog and discards its contents.
    pub fn close(&mut self) {
        self.open = false;
        self.input.clear();
        self.preview = None;
        self.last_error = None;
    }

    /// Records typed text and recomputes the native preview.
    ///
    /// Input that cannot be converted yet has no preview; that is not an error.
    pub fn set_input(&mut self, raw: &str, rate: &ExchangeRate) {
        self.input = raw.to_string();
        self.preview = DonationIntent::parse(raw)
            .and_then(|intent| intent.quote(rate))
            .ok();
    }

    pub async fn submit(
        &mut self,
        orchestrator: &DonationOrchestrator,
        rate: &ExchangeRate,
        actor: &ActorIdentity,
        success_message: Option<&str>,
    ) -> Result<DonationOutcome> {
        let result = match DonationIntent::parse(&self.input) {
            Ok(intent) => {
                orchestrator
                    .donate(&self.address, &intent, rate, actor, success_message)
                    .await
            }
            Err(e) => Err(e),
        };

        match &result {
            Ok(_) => self.close(),
            Err(e) => {
                debug!("Donation form for {} kept open: {}", self.address, e);
                self.open = true;
                self.last_error = Some(e.to_string());
            }
        }
        result
    }

    pub fn address(&self) -> &CampaignAddress {
        &self.address
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn preview(&self) -> Option<&DonationPreview> {
        self.preview.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
