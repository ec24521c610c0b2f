use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use gertonargent_core::users::{BudgetUpdate, User};

use crate::{
    auth::Caller,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Caller(ctx): Caller,
) -> ApiResult<Json<User>> {
    let user = state.user_service.get_profile(&ctx)?.ok_or(ApiError::NotFound)?;
    Ok(Json(user))
}

async fn update_budget(
    State(state): State<Arc<AppState>>,
    Caller(ctx): Caller,
    Json(update): Json<BudgetUpdate>,
) -> ApiResult<Json<User>> {
    let user = state.user_service.update_monthly_budget(&ctx, update).await?;
    Ok(Json(user))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile/budget", put(update_budget))
}
