//! Donations module - fiat intents, their native conversion, submission and
//! the state of the donation dialog.

mod donation_form;
mod donation_orchestrator;
mod donations_model;


pub use donation_form::DonationForm;
pub use donation_orchestrator::DonationOrchestrator;
pub use donations_model::{DonationIntent, DonationOutcome, DonationPreview};
