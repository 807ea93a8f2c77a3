//! Where domain events leave the engine.

use log::warn;
use tokio::sync::mpsc;

use super::DomainEvent;

/// Receives events for mutations the ledger already accepted.
///
/// `emit` runs on the caller's path: it must not block or call the ledger,
/// and a failed emit never undoes or fails the mutation.
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);

    fn emit_batch(&self, events: Vec<DomainEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

#[derive(Clone, Default)]
pub struct NoOpDomainEventSink;

impl DomainEventSink for NoOpDomainEventSink {
    fn emit(&self, _event: DomainEvent) {}
}

/// Hands events to a presentation worker over an unbounded channel.
///
/// The worker owns the receiver and decides what to re-read (catalog page,
/// open cards). Once the receiver is gone, events are dropped with a warning.
#[derive(Clone)]
pub struct ChannelDomainEventSink {
    tx: mpsc::UnboundedSender<DomainEvent>,
}

impl ChannelDomainEventSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DomainEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl DomainEventSink for ChannelDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        if let Err(mpsc::error::SendError(event)) = self.tx.send(event) {
            warn!(
                "Dropping domain event for {} (tx {}): receiver closed",
                event.address(),
                event.tx_hash()
            );
        }
    }
}
