//! Domain events runtime bridge for the web server.
//!
//! Receives domain events via DomainEventSink and runs the budget alert
//! evaluator for every created transaction.

mod queue_worker;
mod sink;

pub use sink::WebDomainEventSink;
