//! Development sample data
//!
//! Seeds one organizer, one player and a tournament so the frontend has
//! something to show. Running it again is a no-op. The three rows are
//! written in one transaction, so a failed seed leaves nothing behind.

use crate::auth::PasswordService;
use crate::error::ApiError;
use crate::repositories::{
    is_unique_violation_any, CreateEvent, EventRepository, NewUser, UserRepository,
};
use gamehub_shared::types::SampleDataResponse;
use gamehub_shared::Role;
use sqlx::PgPool;
use tracing::info;

pub const SAMPLE_ORGANIZER_EMAIL: &str = "organizer@test.com";
pub const SAMPLE_PLAYER_EMAIL: &str = "player@test.com";
pub const SAMPLE_PASSWORD: &str = "password123";

pub struct SampleDataService;

impl SampleDataService {
    pub async fn create(
        pool: &PgPool,
        passwords: &PasswordService,
    ) -> Result<SampleDataResponse, ApiError> {
        if UserRepository::email_exists(pool, SAMPLE_ORGANIZER_EMAIL)
            .await
            .map_err(ApiError::Internal)?
        {
            return Ok(SampleDataResponse {
                message: "Sample data already exists".to_string(),
                organizer_email: None,
                player_email: None,
                password: None,
            });
        }

        let hashed_password = passwords
            .hash_async(SAMPLE_PASSWORD.to_string())
            .await
            .map_err(ApiError::Internal)?;

        let mut tx = pool.begin().await?;

        let organizer = UserRepository::create(
            &mut *tx,
            NewUser {
                name: "Test Organizer".to_string(),
                email: SAMPLE_ORGANIZER_EMAIL.to_string(),
                hashed_password: hashed_password.clone(),
                role: Role::Organizer,
            },
        )
        .await
        .map_err(seed_error)?;

        let player = UserRepository::create(
            &mut *tx,
            NewUser {
                name: "Test Player".to_string(),
                email: SAMPLE_PLAYER_EMAIL.to_string(),
                hashed_password,
                role: Role::Player,
            },
        )
        .await
        .map_err(seed_error)?;

        let event = EventRepository::create(
            &mut *tx,
            CreateEvent {
                title: "Sample Gaming Tournament".to_string(),
                description: Some("Test tournament for gaming enthusiasts".to_string()),
                category: Some("esports".to_string()),
                date: "2025-11-15".to_string(),
                time: "18:00".to_string(),
                location: "Test Gaming Arena".to_string(),
                max_participants: 50,
                organizer_id: organizer.id,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        tx.commit().await?;

        info!(organizer_id = organizer.id, player_id = player.id, event_id = event.id, "Sample data created");
        Ok(SampleDataResponse {
            message: "Sample data created successfully".to_string(),
            organizer_email: Some(organizer.email),
            player_email: Some(player.email),
            password: Some(SAMPLE_PASSWORD.to_string()),
        })
    }
}

/// A sample email taken by a real account aborts the whole seed
fn seed_error(err: anyhow::Error) -> ApiError {
    if is_unique_violation_any(&err) {
        ApiError::Conflict("Sample account email already registered".to_string())
    } else {
        ApiError::Internal(err)
    }
}
