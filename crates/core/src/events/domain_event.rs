//! Domain event types.

use serde::{Deserialize, Serialize};

use crate::transactions::Transaction;

/// Domain events emitted by core services after successful mutations.
///
/// These events represent facts about stored data. Runtime adapters
/// translate them into reactions (budget alerts today).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A transaction record was created.
    TransactionCreated { transaction: Transaction },
}

impl DomainEvent {
    /// Creates a TransactionCreated event.
    pub fn transaction_created(transaction: Transaction) -> Self {
        Self::TransactionCreated { transaction }
    }

    /// Owner of the record the event is about.
    pub fn user_id(&self) -> &str {
        match self {
            DomainEvent::TransactionCreated { transaction } => &transaction.user_id,
        }
    }
}
