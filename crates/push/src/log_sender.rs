use async_trait::async_trait;
use log::info;
use uuid::Uuid;

use gertonargent_core::errors::Result;
use gertonargent_core::notifications::{PushMessage, PushSender};

/// Logs messages instead of delivering them. Used when no service account is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPushSender;

#[async_trait]
impl PushSender for LogPushSender {
    async fn send(&self, message: PushMessage) -> Result<String> {
        let id = format!("local/{}", Uuid::new_v4());
        info!(
            "[push disabled] {} -> {}: {} | {} {:?}",
            id, message.token, message.notification.title, message.notification.body, message.data
        );
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_a_synthetic_id() {
        let id = LogPushSender
            .send(PushMessage::new("device-a", "t", "b"))
            .await
            .unwrap();
        assert!(id.starts_with("local/"));
    }
}
