//! HTTP client for the FCM v1 send endpoint.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

use gertonargent_core::errors::{Error, Result};
use gertonargent_core::notifications::{Notification, PushMessage, PushSender};

use crate::service_account::ServiceAccountKey;
use crate::token_provider::AccessTokenProvider;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_FCM_API_URL: &str = "https://fcm.googleapis.com";

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    message: FcmMessage<'a>,
}

#[derive(Debug, Serialize)]
struct FcmMessage<'a> {
    token: &'a str,
    notification: &'a Notification,
    #[serde(skip_serializing_if = "no_data")]
    data: &'a BTreeMap<String, String>,
}

fn no_data(data: &&BTreeMap<String, String>) -> bool {
    data.is_empty()
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn send_body(message: &PushMessage) -> SendRequest<'_> {
    SendRequest {
        message: FcmMessage {
            token: &message.token,
            notification: &message.notification,
            data: &message.data,
        },
    }
}

/// Sends push messages through Firebase Cloud Messaging.
pub struct FcmClient {
    client: reqwest::Client,
    tokens: AccessTokenProvider,
    send_url: String,
}

impl FcmClient {
    pub fn new(key: ServiceAccountKey) -> Result<Self> {
        Self::with_base_url(key, DEFAULT_FCM_API_URL)
    }

    pub fn with_base_url(key: ServiceAccountKey, base_url: &str) -> Result<Self> {
        let timeout = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
        let tokens = AccessTokenProvider::new(key, timeout)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Push(format!("Failed to initialize HTTP client: {}", e)))?;
        let send_url = format!(
            "{}/v1/projects/{}/messages:send",
            base_url.trim_end_matches('/'),
            tokens.project_id()
        );
        Ok(Self {
            client,
            tokens,
            send_url,
        })
    }
}

#[async_trait]
impl PushSender for FcmClient {
    async fn send(&self, message: PushMessage) -> Result<String> {
        let access_token = self.tokens.access_token().await?;
        debug!("[FCM] POST {}", self.send_url);

        let response = self
            .client
            .post(&self.send_url)
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
            .json(&send_body(&message))
            .send()
            .await
            .map_err(|e| Error::Push(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Push(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                return Err(Error::Push(format!(
                    "FCM error {}: {}",
                    err.error.status.unwrap_or_else(|| status.to_string()),
                    err.error.message.unwrap_or_default()
                )));
            }
            return Err(Error::Push(format!(
                "FCM error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let sent: SendResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Push(format!("Failed to parse response: {} - {}", e, body)))?;
        Ok(sent.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_wraps_message_fields() {
        let message = PushMessage::new("device-a", "Titre", "Corps")
            .with_data("type", "budget_alert")
            .with_data("balance", "-500");

        let value = serde_json::to_value(send_body(&message)).unwrap();
        assert_eq!(
            value,
            json!({
                "message": {
                    "token": "device-a",
                    "notification": {"title": "Titre", "body": "Corps"},
                    "data": {"balance": "-500", "type": "budget_alert"}
                }
            })
        );
    }

    #[test]
    fn empty_data_is_omitted() {
        let message = PushMessage::new("device-a", "Titre", "Corps");
        let value = serde_json::to_value(send_body(&message)).unwrap();
        assert!(value["message"].get("data").is_none());
    }

    #[test]
    fn error_body_parses() {
        let err: ApiErrorResponse = serde_json::from_str(
            r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#,
        )
        .unwrap();
        assert_eq!(err.error.status.as_deref(), Some("NOT_FOUND"));
    }
}
