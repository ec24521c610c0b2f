use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::{debug, error, info};

use super::alerts_model::{AlertOutcome, MonthlyPosition};
use crate::errors::Result;
use crate::notifications::PushSender;
use crate::totals::Totals;
use crate::transactions::{Transaction, TransactionRepositoryTrait};
use crate::users::UserRepositoryTrait;
use crate::utils::month_window;

/// Reacts to newly created transactions by checking the owner's monthly budget.
pub struct BudgetAlertEvaluator {
    user_repository: Arc<dyn UserRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    push_sender: Arc<dyn PushSender>,
    timezone: Tz,
}

impl BudgetAlertEvaluator {
    pub fn new(
        user_repository: Arc<dyn UserRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        push_sender: Arc<dyn PushSender>,
        timezone: Tz,
    ) -> Self {
        Self {
            user_repository,
            transaction_repository,
            push_sender,
            timezone,
        }
    }

    /// Evaluates one created transaction. Errors are logged, never returned.
    pub async fn handle_transaction_created(
        &self,
        transaction: &Transaction,
        now: DateTime<Utc>,
    ) -> AlertOutcome {
        if !transaction.is_expense() {
            return AlertOutcome::NotExpense;
        }
        match self.evaluate(transaction, now).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    "Error sending budget alert for transaction {}: {}",
                    transaction.id, e
                );
                AlertOutcome::Failed(e.to_string())
            }
        }
    }

    async fn evaluate(&self, transaction: &Transaction, now: DateTime<Utc>) -> Result<AlertOutcome> {
        let Some(user) = self.user_repository.get_user(&transaction.user_id)? else {
            debug!("No user record for {}, skipping budget alert", transaction.user_id);
            return Ok(AlertOutcome::UserNotFound);
        };
        let Some(token) = user.device_token() else {
            debug!("User {} has no device token, skipping budget alert", user.id);
            return Ok(AlertOutcome::NoDeviceToken);
        };

        let month = month_window(now, self.timezone);
        let transactions = self.transaction_repository.list_for_user_between(
            &user.id,
            month.start,
            month.end,
        )?;
        let position = MonthlyPosition::new(
            Totals::from_transactions(&transactions)?,
            user.monthly_budget,
        );

        let Some(alert) = position.alert() else {
            return Ok(AlertOutcome::WithinBudget);
        };
        let message_id = self
            .push_sender
            .send(alert.to_message(token, &position))
            .await?;
        info!("Budget alert sent to user {} ({})", user.id, message_id);
        Ok(AlertOutcome::Dispatched(message_id))
    }
}
