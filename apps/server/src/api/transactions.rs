use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use gertonargent_core::transactions::{NewTransactionInput, Transaction};

use crate::{auth::Caller, error::ApiResult, main_lib::AppState};

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Caller(ctx): Caller,
    Json(input): Json<NewTransactionInput>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let transaction = state
        .transaction_service
        .create_transaction(&ctx, input)
        .await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/transactions", post(create_transaction))
}
