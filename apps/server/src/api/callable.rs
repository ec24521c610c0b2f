//! Client-invoked callable functions.
//!
//! Wire format: the request body is `{"data": <input>}`, a success is
//! `{"result": <output>}` and a failure is `{"error": {"status", "message"}}`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use gertonargent_core::advice::{AdviceRequest, AdviceResponse};
use gertonargent_core::tokens::{RegisterTokenRequest, RegisterTokenResponse};
use serde::{Deserialize, Serialize};

use crate::{auth::Caller, error::CallableError, main_lib::AppState};

#[derive(Debug, Deserialize)]
pub struct CallableRequest<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct CallableResponse<T> {
    pub result: T,
}

type CallableResult<T> = Result<Json<CallableResponse<T>>, CallableError>;

fn unpack<T>(payload: Result<Json<CallableRequest<T>>, JsonRejection>) -> Result<T, CallableError> {
    payload
        .map(|Json(request)| request.data)
        .map_err(|rejection| CallableError::invalid_argument(rejection.body_text()))
}

async fn generate_ai_advice(
    State(state): State<Arc<AppState>>,
    Caller(ctx): Caller,
    payload: Result<Json<CallableRequest<AdviceRequest>>, JsonRejection>,
) -> CallableResult<AdviceResponse> {
    ctx.require_uid()
        .map_err(|e| CallableError::from_core(e, "Error generating advice"))?;
    let request = unpack(payload)?;
    let result = state
        .advice_generator
        .generate(&ctx, request)
        .map_err(|e| {
            tracing::error!("Error generating AI advice: {}", e);
            CallableError::from_core(e, "Error generating advice")
        })?;
    Ok(Json(CallableResponse { result }))
}

async fn update_fcm_token(
    State(state): State<Arc<AppState>>,
    Caller(ctx): Caller,
    payload: Result<Json<CallableRequest<RegisterTokenRequest>>, JsonRejection>,
) -> CallableResult<RegisterTokenResponse> {
    ctx.require_uid()
        .map_err(|e| CallableError::from_core(e, "Error updating token"))?;
    let request = unpack(payload)?;
    let result = state
        .token_registrar
        .register(&ctx, request)
        .await
        .map_err(|e| CallableError::from_core(e, "Error updating token"))?;
    Ok(Json(CallableResponse { result }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/callable/generateAIAdvice", post(generate_ai_advice))
        .route("/callable/updateFCMToken", post(update_fcm_token))
}
