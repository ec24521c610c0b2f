#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use gertonargent_core::notifications::{PushMessage, PushSender};
use gertonargent_core::Result as CoreResult;
use gertonargent_server::{api::app_router, build_state_with_push, config::Config};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};
use tempfile::TempDir;
use tower::ServiceExt;

pub const SECRET: &[u8] = b"test-secret-with-exactly-32bytes";

#[derive(Clone, Default)]
pub struct RecordingPushSender {
    sent: Arc<Mutex<Vec<PushMessage>>>,
}

impl RecordingPushSender {
    pub fn sent(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushSender for RecordingPushSender {
    async fn send(&self, message: PushMessage) -> CoreResult<String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(message);
        Ok(format!("projects/test/messages/{}", sent.len()))
    }
}

pub struct TestApp {
    pub router: Router,
    pub push: RecordingPushSender,
    _tmp: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config {
            db_path: tmp.path().join("test.db").to_string_lossy().into_owned(),
            jwt_secret: Some(SECRET.to_vec()),
            ..Config::default()
        };
        let push = RecordingPushSender::default();
        let state = build_state_with_push(&config, Arc::new(push.clone()))
            .await
            .unwrap();
        Self {
            router: app_router(state, &config),
            push,
            _tmp: tmp,
        }
    }

    /// Signs a caller token the way the identity provider would.
    pub fn token_for(&self, uid: &str) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = json!({ "sub": uid, "iat": now, "exp": now + 3600 });
        encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap()
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        uid: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(uid) = uid {
            builder = builder.header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.token_for(uid)),
            );
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}
