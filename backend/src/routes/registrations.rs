//! Event registration routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::services::RegistrationService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use gamehub_shared::types::{CreateRegistrationRequest, RegistrationResponse};

/// Create registration routes
pub fn registration_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(register))
        .route("/my-registrations", get(my_registrations))
        .route("/:id", delete(cancel))
}

/// POST /api/v1/registrations
async fn register(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateRegistrationRequest>,
) -> ApiResult<(StatusCode, Json<RegistrationResponse>)> {
    let registration = RegistrationService::register(state.db(), &auth.user, req.event_id).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

/// GET /api/v1/registrations/my-registrations
async fn my_registrations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<RegistrationResponse>>> {
    let registrations = RegistrationService::list_mine(state.db(), &auth.user).await?;
    Ok(Json(registrations))
}

/// DELETE /api/v1/registrations/:id
async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<RegistrationResponse>> {
    let registration = RegistrationService::cancel(state.db(), &auth.user, id).await?;
    Ok(Json(registration))
}
