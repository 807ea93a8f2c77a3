//! Domain events module.
//!
//! Provides the events emitted after a ledger mutation was accepted and the
//! sink trait through which they leave the engine. Presentation adapters
//! implement the sink to schedule catalog refreshes and similar follow-ups.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
