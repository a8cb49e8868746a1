//! Authentication routes
//!
//! Registration takes JSON; login takes the classic OAuth2 password form
//! (`username` carries the email).

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::{ApiForm, ApiJson};
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use gamehub_shared::types::{
    LoginForm, LoginResponse, RegisterRequest, UserResponse, ValidateTokenResponse,
};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/validate", get(validate))
}

/// Register a new user
///
/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = UserService::register(state.db(), state.passwords(), req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with email and password
///
/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    ApiForm(form): ApiForm<LoginForm>,
) -> ApiResult<Json<LoginResponse>> {
    let response = UserService::login(
        state.db(),
        state.jwt(),
        state.passwords(),
        &form.username,
        &form.password,
    )
    .await?;
    Ok(Json(response))
}

/// Check the presented bearer token
///
/// GET /api/v1/auth/validate
async fn validate(auth: AuthUser) -> Json<ValidateTokenResponse> {
    Json(UserService::validate_token(&auth.user))
}
