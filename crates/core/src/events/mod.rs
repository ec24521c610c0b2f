//! Domain events module.
//!
//! Provides domain event types and the sink trait for emitting events
//! after successful domain mutations. The server implements the sink to
//! run the budget alert evaluator for each created transaction.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
