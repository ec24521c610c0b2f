//! Web domain event sink implementation.
//!
//! Receives domain events and sends them to a background queue worker.

use std::sync::Arc;

use gertonargent_core::alerts::BudgetAlertEvaluator;
use gertonargent_core::events::{DomainEvent, DomainEventSink};
use tokio::sync::mpsc;

use super::queue_worker::event_queue_worker;

/// Domain event sink for the web server runtime.
///
/// # Two-Phase Initialization
///
/// 1. Create the sink with `new()` - this just creates the channel
/// 2. Call `start_worker()` once the evaluator exists - this spawns the worker
///
/// Events emitted in between are buffered in the channel.
pub struct WebDomainEventSink {
    tx: mpsc::UnboundedSender<DomainEvent>,
    rx: std::sync::Mutex<Option<mpsc::UnboundedReceiver<DomainEvent>>>,
}

impl WebDomainEventSink {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            tx,
            rx: std::sync::Mutex::new(Some(rx)),
        }
    }

    /// Starts the background worker. Later calls are ignored.
    pub fn start_worker(&self, evaluator: Arc<BudgetAlertEvaluator>) {
        let rx = match self.rx.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(rx) = rx else {
            tracing::warn!("Domain event worker already started");
            return;
        };

        tokio::spawn(event_queue_worker(rx, evaluator));
    }
}

impl Default for WebDomainEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainEventSink for WebDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        // Best-effort: a closed channel only means the worker is gone.
        if let Err(e) = self.tx.send(event) {
            tracing::warn!("Dropping domain event, worker stopped: {:?}", e.0.user_id());
        }
    }
}
