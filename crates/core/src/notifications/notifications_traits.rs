use crate::errors::Result;
use crate::notifications::notifications_model::PushMessage;
use async_trait::async_trait;

/// Delivers push messages to devices.
#[async_trait]
pub trait PushSender: Send + Sync {
    /// Sends one message and returns the provider's message id.
    async fn send(&self, message: PushMessage) -> Result<String>;
}
