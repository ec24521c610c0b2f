use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::transactions_model::{NewTransaction, NewTransactionInput, Transaction};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::callable::CallContext;
use crate::constants::MAX_AMOUNT;
use crate::errors::{Error, Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink};

pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl TransactionService {
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        TransactionService {
            repository,
            event_sink,
        }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn create_transaction(
        &self,
        ctx: &CallContext,
        input: NewTransactionInput,
    ) -> Result<Transaction> {
        let uid = ctx.require_uid()?.to_string();
        if input.amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Transaction amount cannot be negative".to_string(),
            )));
        }
        if input.amount > MAX_AMOUNT {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Transaction amount cannot exceed {}",
                MAX_AMOUNT
            ))));
        }

        let now = Utc::now();
        let new_transaction = NewTransaction {
            id: Uuid::new_v4().to_string(),
            user_id: uid,
            transaction_type: input.transaction_type,
            amount: input.amount,
            category: input.category,
            description: input.description,
            date: input.date.unwrap_or(now),
            created_at: now,
        };

        let created = self.repository.create_transaction(new_transaction).await?;
        debug!(
            "Recorded {} transaction {} for user {}",
            created.transaction_type, created.id, created.user_id
        );

        // The record is durable at this point; listeners react on their own time.
        self.event_sink
            .emit(DomainEvent::transaction_created(created.clone()));
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MockDomainEventSink;
    use crate::transactions::test_support::InMemoryTransactionRepository;
    use crate::transactions::TransactionType;
    use rust_decimal_macros::dec;

    fn input(amount: Decimal) -> NewTransactionInput {
        NewTransactionInput {
            transaction_type: TransactionType::Expense,
            amount,
            category: Some("food".to_string()),
            description: None,
            date: None,
        }
    }

    #[tokio::test]
    async fn creation_stamps_caller_and_emits_event() {
        let repo = Arc::new(InMemoryTransactionRepository::new());
        let sink = Arc::new(MockDomainEventSink::new());
        let service = TransactionService::new(repo.clone(), sink.clone());

        let created = service
            .create_transaction(&CallContext::authenticated("alice"), input(dec!(1200)))
            .await
            .unwrap();

        assert_eq!(created.user_id, "alice");
        assert_eq!(repo.all().len(), 1);

        let events = sink.events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            DomainEvent::TransactionCreated { transaction } => {
                assert_eq!(transaction.id, created.id);
            }
        }
    }

    #[tokio::test]
    async fn negative_amount_is_rejected_without_event() {
        let sink = Arc::new(MockDomainEventSink::new());
        let service = TransactionService::new(
            Arc::new(InMemoryTransactionRepository::new()),
            sink.clone(),
        );

        let err = service
            .create_transaction(&CallContext::authenticated("alice"), input(dec!(-5)))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(sink.events().is_empty());
    }

    #[tokio::test]
    async fn oversized_amount_is_rejected() {
        let repo = Arc::new(InMemoryTransactionRepository::new());
        let sink = Arc::new(MockDomainEventSink::new());
        let service = TransactionService::new(repo.clone(), sink.clone());
        let ctx = CallContext::authenticated("alice");

        let huge = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
        let err = service
            .create_transaction(&ctx, input(huge))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(repo.all().is_empty());
        assert!(sink.events().is_empty());

        service
            .create_transaction(&ctx, input(MAX_AMOUNT))
            .await
            .unwrap();
        assert_eq!(repo.all().len(), 1);
    }

    #[tokio::test]
    async fn anonymous_caller_cannot_record() {
        let service = TransactionService::new(
            Arc::new(InMemoryTransactionRepository::new()),
            Arc::new(MockDomainEventSink::new()),
        );
        let err = service
            .create_transaction(&CallContext::anonymous(), input(dec!(10)))
            .await
            .unwrap_err();
        assert!(err.is_unauthenticated());
    }
}
