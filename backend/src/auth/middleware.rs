//! Bearer token extraction and user resolution
//!
//! `AuthUser` validates the `Authorization: Bearer <token>` header against
//! the pre-computed JWT keys in `AppState`, then loads the subject's user
//! row. Nothing is cached between requests.

use crate::error::ApiError;
use crate::repositories::{UserRecord, UserRepository};
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use gamehub_shared::{AuthError, Role};
use tracing::debug;

/// Authenticated user resolved from a bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: UserRecord,
}

impl AuthUser {
    #[inline]
    pub fn id(&self) -> i32 {
        self.user.id
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.user.role()
    }
}

/// Pull the token out of `Authorization: Bearer <token>`
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized(AuthError::MissingToken.to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized(AuthError::InvalidScheme.to_string()))
}

/// Validate the token and load the matching active user
pub async fn resolve_user(state: &AppState, headers: &HeaderMap) -> Result<UserRecord, ApiError> {
    let token = extract_bearer_token(headers)?;

    let claims = state.jwt().validate(token).map_err(|e| {
        debug!(reason = %e, "Rejected bearer token");
        ApiError::Unauthorized(AuthError::InvalidToken.to_string())
    })?;

    let user = UserRepository::find_by_email(state.db(), &claims.sub)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::Unauthorized(AuthError::InvalidToken.to_string()))?;

    if !user.is_active {
        debug!(user_id = user.id, "Rejected token for inactive user");
        return Err(ApiError::Unauthorized(AuthError::InvalidToken.to_string()));
    }

    Ok(user)
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let user = resolve_user(&app_state, &parts.headers).await?;
        Ok(AuthUser { user })
    }
}
