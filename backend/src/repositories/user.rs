//! User repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use gamehub_shared::types::{UserResponse, UserSummary};
use gamehub_shared::Role;
use sqlx::{PgExecutor, PgPool};

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub hashed_password: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Parsed role; unknown values degrade to the least-privileged role
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or(Role::Player)
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role(),
        }
    }
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        let role = user.role();
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub hashed_password: String,
    pub role: Role,
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Insert a user; the unique index on `email` rejects duplicates
    ///
    /// Takes a pool or a transaction.
    pub async fn create<'e, E: PgExecutor<'e>>(executor: E, input: NewUser) -> Result<UserRecord> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (name, email, hashed_password, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, hashed_password, role, is_active, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.hashed_password)
        .bind(input.role.as_str())
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    /// Find user by email (exact, case-sensitive match)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, hashed_password, role, is_active, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Check if email exists
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    /// Activate or deactivate an account
    pub async fn set_active(pool: &PgPool, id: i32, is_active: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(is_active)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
