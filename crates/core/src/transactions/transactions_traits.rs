use crate::callable::CallContext;
use crate::errors::Result;
use crate::transactions::transactions_model::{NewTransaction, NewTransactionInput, Transaction};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Trait for transaction repository operations
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    /// Loads the user's transactions dated within `[start, end]` (both inclusive).
    fn list_for_user_between(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    async fn create_transaction(
        &self,
        ctx: &CallContext,
        input: NewTransactionInput,
    ) -> Result<Transaction>;
}
