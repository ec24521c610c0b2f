use std::sync::Arc;

use log::{debug, error};

use super::tokens_model::{RegisterTokenRequest, RegisterTokenResponse};
use crate::callable::CallContext;
use crate::errors::Result;
use crate::users::UserRepositoryTrait;

/// Stores the caller's device messaging token on their own user record.
pub struct TokenRegistrar {
    user_repository: Arc<dyn UserRepositoryTrait>,
}

impl TokenRegistrar {
    pub fn new(user_repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { user_repository }
    }

    /// The target record is always the caller's; there is no way to name another user.
    pub async fn register(
        &self,
        ctx: &CallContext,
        request: RegisterTokenRequest,
    ) -> Result<RegisterTokenResponse> {
        let uid = ctx.require_uid()?.to_string();
        debug!("Registering device token for user {}", uid);
        self.user_repository
            .upsert_fcm_token(uid, request.fcm_token)
            .await
            .map_err(|e| {
                error!("Error updating FCM token: {}", e);
                e
            })?;
        Ok(RegisterTokenResponse { success: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::test_support::InMemoryUserRepository;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn request(token: &str) -> RegisterTokenRequest {
        RegisterTokenRequest {
            fcm_token: token.to_string(),
        }
    }

    #[tokio::test]
    async fn token_is_written_to_caller_only() {
        let repo = Arc::new(InMemoryUserRepository::new());
        repo.add_user("alice", dec!(5000), Some("old-token"));
        repo.add_user("bob", dec!(7000), Some("bob-token"));
        let registrar = TokenRegistrar::new(repo.clone());

        let response = registrar
            .register(&CallContext::authenticated("alice"), request("new-token"))
            .await
            .unwrap();

        assert!(response.success);
        let alice = repo.user("alice").unwrap();
        assert_eq!(alice.fcm_token.as_deref(), Some("new-token"));
        assert_eq!(alice.monthly_budget, dec!(5000));
        assert_eq!(repo.user("bob").unwrap().fcm_token.as_deref(), Some("bob-token"));
    }

    #[tokio::test]
    async fn first_registration_creates_the_record() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let registrar = TokenRegistrar::new(repo.clone());

        registrar
            .register(&CallContext::authenticated("carol"), request("device-c"))
            .await
            .unwrap();

        let carol = repo.user("carol").unwrap();
        assert_eq!(carol.monthly_budget, Decimal::ZERO);
        assert_eq!(carol.device_token(), Some("device-c"));
    }

    #[tokio::test]
    async fn anonymous_caller_writes_nothing() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let registrar = TokenRegistrar::new(repo.clone());

        let err = registrar
            .register(&CallContext::anonymous(), request("device-x"))
            .await
            .unwrap_err();
        assert!(err.is_unauthenticated());
        assert!(repo.list_users_page(None, 10).unwrap().is_empty());
    }

    #[tokio::test]
    async fn storage_failure_is_surfaced() {
        let repo = Arc::new(InMemoryUserRepository::new());
        repo.fail_writes();
        let registrar = TokenRegistrar::new(repo);

        let err = registrar
            .register(&CallContext::authenticated("alice"), request("device-a"))
            .await
            .unwrap_err();
        assert!(!err.is_unauthenticated());
    }
}
