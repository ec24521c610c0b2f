//! Event queue worker for processing domain events.
//!
//! Every event is handled in its own task, so evaluations for different
//! transactions run independently and in no particular order.

use std::sync::Arc;

use chrono::Utc;
use gertonargent_core::alerts::{AlertOutcome, BudgetAlertEvaluator};
use gertonargent_core::events::DomainEvent;
use tokio::sync::mpsc;

pub async fn event_queue_worker(
    mut rx: mpsc::UnboundedReceiver<DomainEvent>,
    evaluator: Arc<BudgetAlertEvaluator>,
) {
    tracing::info!("Domain event queue worker started");

    while let Some(event) = rx.recv().await {
        let evaluator = evaluator.clone();
        tokio::spawn(async move {
            match event {
                DomainEvent::TransactionCreated { transaction } => {
                    let outcome = evaluator
                        .handle_transaction_created(&transaction, Utc::now())
                        .await;
                    match outcome {
                        AlertOutcome::Dispatched(message_id) => tracing::info!(
                            "Budget alert for transaction {} delivered as {}",
                            transaction.id,
                            message_id
                        ),
                        AlertOutcome::Failed(reason) => tracing::warn!(
                            "Budget alert for transaction {} failed: {}",
                            transaction.id,
                            reason
                        ),
                        other => tracing::debug!(
                            "Budget alert for transaction {}: {:?}",
                            transaction.id,
                            other
                        ),
                    }
                }
            }
        });
    }

    tracing::info!("Domain event queue worker shutting down");
}
