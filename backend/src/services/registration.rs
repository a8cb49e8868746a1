//! Event registration service

use super::event::event_not_found;
use crate::error::ApiError;
use crate::repositories::{CancelOutcome, RegisterOutcome, RegistrationRepository, UserRecord};
use gamehub_shared::types::RegistrationResponse;
use sqlx::PgPool;
use tracing::{debug, info};

/// Registration service for business logic
pub struct RegistrationService;

impl RegistrationService {
    /// Register the caller for an event, consuming one slot
    pub async fn register(
        pool: &PgPool,
        caller: &UserRecord,
        event_id: i32,
    ) -> Result<RegistrationResponse, ApiError> {
        let outcome = RegistrationRepository::register(pool, caller.id, event_id)
            .await
            .map_err(ApiError::Internal)?;

        match outcome {
            RegisterOutcome::Registered(record) => {
                info!(registration_id = record.id, event_id, user_id = caller.id, "Registered for event");
                Ok(record.into())
            }
            RegisterOutcome::EventNotFound => Err(event_not_found()),
            RegisterOutcome::NoCapacity => {
                debug!(event_id, user_id = caller.id, "Registration rejected: event full");
                Err(ApiError::Conflict(
                    "No slots available for this event".to_string(),
                ))
            }
            RegisterOutcome::AlreadyRegistered => {
                debug!(event_id, user_id = caller.id, "Registration rejected: duplicate");
                Err(ApiError::Conflict(
                    "Already registered for this event".to_string(),
                ))
            }
        }
    }

    /// The caller's registrations, cancelled ones included
    pub async fn list_mine(
        pool: &PgPool,
        caller: &UserRecord,
    ) -> Result<Vec<RegistrationResponse>, ApiError> {
        let records = RegistrationRepository::list_by_user(pool, caller.id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Cancel one of the caller's registrations and free its slot
    pub async fn cancel(
        pool: &PgPool,
        caller: &UserRecord,
        registration_id: i32,
    ) -> Result<RegistrationResponse, ApiError> {
        let outcome = RegistrationRepository::cancel(pool, registration_id, caller.id)
            .await
            .map_err(ApiError::Internal)?;

        match outcome {
            CancelOutcome::Cancelled(record) => {
                info!(registration_id, event_id = record.event_id, user_id = caller.id, "Registration cancelled");
                Ok(record.into())
            }
            CancelOutcome::NotFound => Err(ApiError::NotFound(
                "Registration not found".to_string(),
            )),
            CancelOutcome::NotOwner => Err(ApiError::Forbidden(
                "You can only cancel your own registrations".to_string(),
            )),
            CancelOutcome::AlreadyCancelled => Err(ApiError::Conflict(
                "Registration is already cancelled".to_string(),
            )),
        }
    }
}
