//! Development-only routes
//!
//! Mounted only when `server.enable_dev_routes` is set.

use crate::error::ApiResult;
use crate::services::SampleDataService;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use gamehub_shared::types::SampleDataResponse;

pub fn dev_routes() -> Router<AppState> {
    Router::new().route("/sample-data", post(create_sample_data))
}

/// POST /api/v1/dev/sample-data
async fn create_sample_data(State(state): State<AppState>) -> ApiResult<Json<SampleDataResponse>> {
    let response = SampleDataService::create(state.db(), state.passwords()).await?;
    Ok(Json(response))
}
