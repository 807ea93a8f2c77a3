//! Owner-only mutations: withdrawing funds and changing the beneficiary.

mod owner_gateway;

pub use owner_gateway::{OwnerActionGateway, OwnerActionOutcome};
