use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use super::users_model::{BudgetUpdate, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::callable::CallContext;
use crate::constants::MAX_AMOUNT;
use crate::errors::{Error, Result, ValidationError};

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        UserService { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn get_profile(&self, ctx: &CallContext) -> Result<Option<User>> {
        let uid = ctx.require_uid()?;
        self.repository.get_user(uid)
    }

    async fn update_monthly_budget(&self, ctx: &CallContext, update: BudgetUpdate) -> Result<User> {
        let uid = ctx.require_uid()?.to_string();
        if update.monthly_budget < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Monthly budget cannot be negative".to_string(),
            )));
        }
        if update.monthly_budget > MAX_AMOUNT {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Monthly budget cannot exceed {}",
                MAX_AMOUNT
            ))));
        }
        debug!("Updating monthly budget for user {}", uid);
        self.repository
            .upsert_monthly_budget(uid, update.monthly_budget)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::test_support::InMemoryUserRepository;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn budget_update_is_scoped_to_caller() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let service = UserService::new(repo.clone());

        let ctx = CallContext::authenticated("alice");
        let user = service
            .update_monthly_budget(
                &ctx,
                BudgetUpdate {
                    monthly_budget: dec!(5000),
                },
            )
            .await
            .unwrap();

        assert_eq!(user.id, "alice");
        assert_eq!(user.monthly_budget, dec!(5000));
        assert_eq!(
            service.get_profile(&ctx).unwrap().unwrap().monthly_budget,
            dec!(5000)
        );
    }

    #[tokio::test]
    async fn negative_budget_is_rejected() {
        let service = UserService::new(Arc::new(InMemoryUserRepository::new()));
        let err = service
            .update_monthly_budget(
                &CallContext::authenticated("alice"),
                BudgetUpdate {
                    monthly_budget: dec!(-1),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn budget_above_ceiling_is_rejected() {
        assert_eq!(MAX_AMOUNT, dec!(1000000000000000));
        let repo = Arc::new(InMemoryUserRepository::new());
        let service = UserService::new(repo.clone());
        let err = service
            .update_monthly_budget(
                &CallContext::authenticated("alice"),
                BudgetUpdate {
                    monthly_budget: MAX_AMOUNT + Decimal::ONE,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(repo.user("alice").is_none());
    }

    #[test]
    fn anonymous_profile_read_fails() {
        let service = UserService::new(Arc::new(InMemoryUserRepository::new()));
        let err = service.get_profile(&CallContext::anonymous()).unwrap_err();
        assert!(err.is_unauthenticated());
    }
}
