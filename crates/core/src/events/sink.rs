//! Where services publish domain events.

use std::sync::{Arc, Mutex};

use super::DomainEvent;

/// Receives events from core services once a write has committed.
///
/// `emit` is called on the request path, so it must return immediately and
/// must not fail the write. Reactions (budget alerts) run elsewhere.
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);
}

/// Discards every event.
#[derive(Clone, Default)]
pub struct NoOpDomainEventSink;

impl DomainEventSink for NoOpDomainEventSink {
    fn emit(&self, _event: DomainEvent) {}
}

/// Keeps emitted events in memory for assertions.
#[derive(Clone, Default)]
pub struct MockDomainEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MockDomainEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::{Transaction, TransactionType};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn event(id: &str) -> DomainEvent {
        let now = Utc::now();
        DomainEvent::transaction_created(Transaction {
            id: id.to_string(),
            user_id: "alice".to_string(),
            transaction_type: TransactionType::Income,
            amount: Decimal::ONE,
            category: None,
            description: None,
            date: now,
            created_at: now,
        })
    }

    #[test]
    fn noop_sink_accepts_events() {
        NoOpDomainEventSink.emit(event("a"));
    }

    #[test]
    fn mock_sink_keeps_emission_order() {
        let sink = MockDomainEventSink::new();
        assert!(sink.events().is_empty());

        for id in ["a", "b", "c"] {
            sink.emit(event(id));
        }
        let ids: Vec<String> = sink
            .events()
            .into_iter()
            .map(|e| match e {
                DomainEvent::TransactionCreated { transaction } => transaction.id,
            })
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
