//! Feedback routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::services::FeedbackService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use gamehub_shared::types::{CreateFeedbackRequest, FeedbackResponse, MessageResponse};

pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_feedback))
        .route("/:id", delete(delete_feedback))
}

/// POST /api/v1/feedback
async fn create_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateFeedbackRequest>,
) -> ApiResult<(StatusCode, Json<FeedbackResponse>)> {
    let feedback = FeedbackService::create(state.db(), &auth.user, req).await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

/// DELETE /api/v1/feedback/:id
async fn delete_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<MessageResponse>> {
    let response = FeedbackService::delete(state.db(), &auth.user, id).await?;
    Ok(Json(response))
}
