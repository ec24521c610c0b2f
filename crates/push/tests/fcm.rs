use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use gertonargent_core::errors::Error;
use gertonargent_core::notifications::{PushMessage, PushSender};
use gertonargent_push::{FcmClient, ServiceAccountKey};
use serde_json::{json, Value};

const ACCESS_TOKEN: &str = "ya29.local-test";
const PROJECT: &str = "gertonargent-test";

#[derive(Default)]
struct FakeGoogle {
    reject_token_requests: bool,
    token_requests: AtomicUsize,
    sends: AtomicUsize,
}

async fn grant_access_token(State(google): State<Arc<FakeGoogle>>, body: String) -> (StatusCode, Json<Value>) {
    google.token_requests.fetch_add(1, Ordering::SeqCst);
    if google.reject_token_requests {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_grant", "error_description": "Invalid JWT Signature."})),
        );
    }
    assert!(body.contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"));
    assert!(body.contains("&assertion="));
    (
        StatusCode::OK,
        Json(json!({"access_token": ACCESS_TOKEN, "expires_in": 3599, "token_type": "Bearer"})),
    )
}

async fn send_message(
    State(google): State<Arc<FakeGoogle>>,
    Path((project, action)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let n = google.sends.fetch_add(1, Ordering::SeqCst) + 1;
    assert_eq!(project, PROJECT);
    assert_eq!(action, "messages:send");
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if bearer != format!("Bearer {}", ACCESS_TOKEN) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"code": 401, "status": "UNAUTHENTICATED", "message": "bad token"}})),
        );
    }
    if body["message"]["token"] == "device-unregistered" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {
                "code": 404,
                "message": "Requested entity was not found.",
                "status": "NOT_FOUND"
            }})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"name": format!("projects/{}/messages/{}", PROJECT, n)})),
    )
}

async fn spawn_fake_google(google: Arc<FakeGoogle>) -> SocketAddr {
    let app = Router::new()
        .route("/token", post(grant_access_token))
        .route("/v1/projects/{project}/{action}", post(send_message))
        .with_state(google);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> FcmClient {
    let key = ServiceAccountKey {
        project_id: PROJECT.to_string(),
        client_email: "push@gertonargent-test.iam.gserviceaccount.com".to_string(),
        private_key: include_str!("fixtures/service_account_key.pem").to_string(),
        token_uri: format!("http://{}/token", addr),
    };
    FcmClient::with_base_url(key, &format!("http://{}/", addr)).unwrap()
}

fn alert(token: &str) -> PushMessage {
    PushMessage::new(token, "GèrTonArgent - Alerte Budget", "Attention! 90% du budget utilisé")
        .with_data("type", "budget_alert")
}

#[tokio::test]
async fn sends_return_message_names_and_share_one_access_token() {
    let google = Arc::new(FakeGoogle::default());
    let client = client_for(spawn_fake_google(google.clone()).await);

    let first = client.send(alert("device-a")).await.unwrap();
    let second = client.send(alert("device-b")).await.unwrap();

    assert_eq!(first, "projects/gertonargent-test/messages/1");
    assert_eq!(second, "projects/gertonargent-test/messages/2");
    assert_eq!(google.token_requests.load(Ordering::SeqCst), 1);
    assert_eq!(google.sends.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unknown_device_becomes_push_error() {
    let google = Arc::new(FakeGoogle::default());
    let client = client_for(spawn_fake_google(google).await);

    match client.send(alert("device-unregistered")).await {
        Err(Error::Push(message)) => {
            assert_eq!(message, "FCM error NOT_FOUND: Requested entity was not found.")
        }
        other => panic!("expected a push error, got {:?}", other),
    }
}

#[tokio::test]
async fn rejected_token_exchange_stops_before_sending() {
    let google = Arc::new(FakeGoogle {
        reject_token_requests: true,
        ..FakeGoogle::default()
    });
    let client = client_for(spawn_fake_google(google.clone()).await);

    match client.send(alert("device-a")).await {
        Err(Error::Push(message)) => assert!(message.starts_with("Token endpoint returned 400")),
        other => panic!("expected a push error, got {:?}", other),
    }
    assert_eq!(google.sends.load(Ordering::SeqCst), 0);
}
