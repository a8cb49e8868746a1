//! Route definitions for the GameHub API
//!
//! This module organizes all API routes and applies middleware.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Json, Router,
};
use gamehub_shared::types::MessageResponse;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod dev;
mod events;
mod feedback;
mod health;
mod registrations;

#[cfg(test)]
mod auth_tests;

pub use auth::auth_routes;
pub use dev::dev_routes;
pub use events::event_routes;
pub use feedback::feedback_routes;
pub use registrations::registration_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let dev_enabled = state.config().server.enable_dev_routes;

    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes(dev_enabled))
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes(dev_enabled: bool) -> Router<AppState> {
    let router = Router::new()
        .route("/", get(|| async { "GameHub API v1" }))
        .nest("/auth", auth::auth_routes())
        .nest("/events", events::event_routes())
        .nest("/registrations", registrations::registration_routes())
        .nest("/feedback", feedback::feedback_routes());

    if dev_enabled {
        router.nest("/dev", dev::dev_routes())
    } else {
        router
    }
}

async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to GameHub API".to_string(),
    })
}
