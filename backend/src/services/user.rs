//! User service for registration and authentication
//!
//! Password hashing and verification run on the blocking thread pool; the
//! JWT service is passed by reference with its keys already derived.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{is_unique_violation_any, NewUser, UserRecord, UserRepository};
use gamehub_shared::types::{LoginResponse, RegisterRequest, UserResponse, ValidateTokenResponse};
use gamehub_shared::validation::{validate_email, validate_name, validate_password};
use gamehub_shared::{AuthError, Role};
use sqlx::PgPool;
use tracing::{debug, info};
use validator::Validate;

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user
    pub async fn register(
        pool: &PgPool,
        passwords: &PasswordService,
        request: RegisterRequest,
    ) -> Result<UserResponse, ApiError> {
        request.validate()?;
        ensure_self_registrable(request.role)?;
        validate_name(&request.name).map_err(ApiError::Validation)?;
        validate_email(&request.email).map_err(ApiError::Validation)?;
        validate_password(&request.password).map_err(ApiError::Validation)?;

        if UserRepository::email_exists(pool, &request.email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let hashed_password = passwords
            .hash_async(request.password)
            .await
            .map_err(ApiError::Internal)?;

        let new_user = NewUser {
            name: request.name.trim().to_string(),
            email: request.email,
            hashed_password,
            role: request.role,
        };

        // The unique index catches a concurrent registration of the same email
        let user = UserRepository::create(pool, new_user).await.map_err(|e| {
            if is_unique_violation_any(&e) {
                ApiError::Conflict("Email already registered".to_string())
            } else {
                ApiError::Internal(e)
            }
        })?;

        info!(user_id = user.id, role = %user.role(), "User registered");
        Ok(user.into())
    }

    /// Check credentials and issue an access token
    ///
    /// Unknown email, wrong password and deactivated account all produce
    /// the same error.
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtService,
        passwords: &PasswordService,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let user = Self::authenticate(pool, passwords, email, password)
            .await?
            .ok_or_else(|| ApiError::Unauthorized(AuthError::InvalidCredentials.to_string()))?;

        let access_token = jwt
            .issue_access_token(&user.email)
            .map_err(ApiError::Internal)?;

        info!(user_id = user.id, "User logged in");
        Ok(LoginResponse {
            access_token,
            token_type: "bearer".to_string(),
            user: user.summary(),
        })
    }

    /// Resolve credentials to an active user, or `None` on any mismatch
    pub async fn authenticate(
        pool: &PgPool,
        passwords: &PasswordService,
        email: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, ApiError> {
        let user = match UserRepository::find_by_email(pool, email)
            .await
            .map_err(ApiError::Internal)?
        {
            Some(user) => user,
            None => {
                debug!("Login attempt for unknown email");
                passwords
                    .verify_missing_async(password.to_string())
                    .await
                    .map_err(ApiError::Internal)?;
                return Ok(None);
            }
        };

        let valid = passwords
            .verify_async(password.to_string(), user.hashed_password.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            debug!(user_id = user.id, "Password mismatch");
            return Ok(None);
        }
        if !user.is_active {
            debug!(user_id = user.id, "Login attempt for inactive user");
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Describe the user behind an already-validated token
    pub fn validate_token(user: &UserRecord) -> ValidateTokenResponse {
        ValidateTokenResponse {
            valid: true,
            user: user.summary(),
        }
    }
}

/// Admin accounts are provisioned out of band, never through the public endpoint
fn ensure_self_registrable(role: Role) -> Result<(), ApiError> {
    if role == Role::Admin {
        return Err(ApiError::Forbidden(
            "Admin accounts cannot be self-registered".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_admin_role_is_not_self_registrable() {
        assert!(ensure_self_registrable(Role::Player).is_ok());
        assert!(ensure_self_registrable(Role::Organizer).is_ok());
        assert!(matches!(
            ensure_self_registrable(Role::Admin),
            Err(ApiError::Forbidden(_))
        ));
    }

    #[test]
    fn test_validate_token_response() {
        let user = UserRecord {
            id: 3,
            name: "Test Player".to_string(),
            email: "player@test.com".to_string(),
            hashed_password: "secret-hash".to_string(),
            role: "player".to_string(),
            is_active: true,
            created_at: Utc::now(),
        };

        let response = UserService::validate_token(&user);
        assert!(response.valid);
        assert_eq!(response.user.id, 3);
        assert_eq!(response.user.role, Role::Player);

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("secret-hash"));
    }
}
