//! Event routes
//!
//! Listing and detail views are public; mutations need a bearer token and
//! the role checks in `EventService`.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::services::EventService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use gamehub_shared::types::{
    CreateEventRequest, DeleteEventResponse, EventFeedbackEntry, EventRegistrationEntry,
    EventResponse, UpdateEventRequest,
};

/// Create event routes
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/my-events", get(my_events))
        .route(
            "/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/:id/registrations", get(event_registrations))
        .route("/:id/feedback", get(event_feedback))
}

/// GET /api/v1/events
async fn list_events(State(state): State<AppState>) -> ApiResult<Json<Vec<EventResponse>>> {
    let events = EventService::list(state.db()).await?;
    Ok(Json(events))
}

/// POST /api/v1/events
async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateEventRequest>,
) -> ApiResult<(StatusCode, Json<EventResponse>)> {
    let event = EventService::create(state.db(), &auth.user, req).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/v1/events/my-events
async fn my_events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<EventResponse>>> {
    let events = EventService::list_mine(state.db(), &auth.user).await?;
    Ok(Json(events))
}

/// GET /api/v1/events/:id
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<EventResponse>> {
    let event = EventService::get(state.db(), id).await?;
    Ok(Json(event))
}

/// PUT /api/v1/events/:id
async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    ApiJson(req): ApiJson<UpdateEventRequest>,
) -> ApiResult<Json<EventResponse>> {
    let event = EventService::update(state.db(), &auth.user, id, req).await?;
    Ok(Json(event))
}

/// DELETE /api/v1/events/:id
async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<DeleteEventResponse>> {
    let response = EventService::delete(state.db(), &auth.user, id).await?;
    Ok(Json(response))
}

/// GET /api/v1/events/:id/registrations
async fn event_registrations(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<EventRegistrationEntry>>> {
    let registrations = EventService::registrations(state.db(), id).await?;
    Ok(Json(registrations))
}

/// GET /api/v1/events/:id/feedback
async fn event_feedback(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<EventFeedbackEntry>>> {
    let feedback = EventService::feedback(state.db(), id).await?;
    Ok(Json(feedback))
}
