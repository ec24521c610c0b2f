use crate::callable::CallContext;
use crate::errors::Result;
use crate::users::users_model::{BudgetUpdate, User};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<Option<User>>;
    /// Loads up to `limit` users with an id strictly greater than `after`, ordered by id.
    fn list_users_page(&self, after: Option<&str>, limit: i64) -> Result<Vec<User>>;
    async fn upsert_fcm_token(&self, user_id: String, fcm_token: String) -> Result<User>;
    async fn upsert_monthly_budget(&self, user_id: String, monthly_budget: Decimal)
        -> Result<User>;
}

/// Trait for user profile operations performed by the caller on itself
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_profile(&self, ctx: &CallContext) -> Result<Option<User>>;
    async fn update_monthly_budget(&self, ctx: &CallContext, update: BudgetUpdate) -> Result<User>;
}
