//! Event service
//!
//! Role and ownership rules come from `Role`'s predicates; this module only
//! maps their outcome onto API errors.

use crate::error::ApiError;
use crate::repositories::{
    CreateEvent, EventRecord, EventRepository, FeedbackRepository, RegistrationRepository,
    UpdateEvent, UserRecord,
};
use gamehub_shared::types::{
    CreateEventRequest, DeleteEventResponse, EventFeedbackEntry, EventRegistrationEntry,
    EventResponse, UpdateEventRequest,
};
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

/// Event service for business logic
pub struct EventService;

impl EventService {
    /// Active events with their organizers
    pub async fn list(pool: &PgPool) -> Result<Vec<EventResponse>, ApiError> {
        let events = EventRepository::list_active(pool)
            .await
            .map_err(ApiError::Internal)?;

        Ok(events.into_iter().map(Into::into).collect())
    }

    pub async fn get(pool: &PgPool, event_id: i32) -> Result<EventResponse, ApiError> {
        Ok(Self::find(pool, event_id).await?.into())
    }

    /// Create an event owned by `caller`
    pub async fn create(
        pool: &PgPool,
        caller: &UserRecord,
        request: CreateEventRequest,
    ) -> Result<EventResponse, ApiError> {
        if !caller.role().can_create_event() {
            return Err(ApiError::Forbidden(
                "Only organizers can create events".to_string(),
            ));
        }
        request.validate()?;

        let input = CreateEvent {
            title: request.title,
            description: request.description,
            category: request.category,
            date: request.date,
            time: request.time,
            location: request.location,
            max_participants: request.max_participants,
            organizer_id: caller.id,
        };

        let event = EventRepository::create(pool, input)
            .await
            .map_err(ApiError::Internal)?;

        info!(event_id = event.id, organizer_id = caller.id, "Event created");
        Ok(event.into())
    }

    /// Events organized by the caller, including inactive ones
    pub async fn list_mine(
        pool: &PgPool,
        caller: &UserRecord,
    ) -> Result<Vec<EventResponse>, ApiError> {
        if !caller.role().can_list_own_events() {
            return Err(ApiError::Forbidden(
                "Only organizers can view their events".to_string(),
            ));
        }

        let events = EventRepository::list_by_organizer(pool, caller.id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(events.into_iter().map(Into::into).collect())
    }

    /// Partially update an event
    pub async fn update(
        pool: &PgPool,
        caller: &UserRecord,
        event_id: i32,
        request: UpdateEventRequest,
    ) -> Result<EventResponse, ApiError> {
        request.validate()?;

        let event = Self::find(pool, event_id).await?;
        if !caller.role().can_manage_event(event.organizer_id == caller.id) {
            return Err(ApiError::Forbidden(
                "You can only update your own events".to_string(),
            ));
        }

        let updates = UpdateEvent {
            title: request.title,
            description: request.description,
            category: request.category,
            date: request.date,
            time: request.time,
            location: request.location,
            max_participants: request.max_participants,
            is_active: request.is_active,
        };

        let updated = EventRepository::update(pool, event_id, updates)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(event_not_found)?;

        info!(event_id, user_id = caller.id, "Event updated");
        Ok(updated.into())
    }

    /// Delete an event with its registrations and feedback
    pub async fn delete(
        pool: &PgPool,
        caller: &UserRecord,
        event_id: i32,
    ) -> Result<DeleteEventResponse, ApiError> {
        let role = caller.role();
        if !role.can_create_event() {
            return Err(ApiError::Forbidden(
                "Only organizers can delete events".to_string(),
            ));
        }

        let event = Self::find(pool, event_id).await?;
        if !role.can_delete_event(event.organizer_id == caller.id) {
            return Err(ApiError::Forbidden(
                "You can only delete your own events".to_string(),
            ));
        }

        let deleted = EventRepository::delete_cascade(pool, event_id)
            .await
            .map_err(|e| ApiError::Internal(e.context("Failed to delete event")))?;
        if !deleted {
            return Err(event_not_found());
        }

        info!(event_id, user_id = caller.id, "Event deleted");
        Ok(DeleteEventResponse {
            message: "Event deleted successfully".to_string(),
            event_id,
        })
    }

    /// Registrations for an event with registrant names
    pub async fn registrations(
        pool: &PgPool,
        event_id: i32,
    ) -> Result<Vec<EventRegistrationEntry>, ApiError> {
        let records = RegistrationRepository::list_for_event(pool, event_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Feedback for an event with author names
    pub async fn feedback(
        pool: &PgPool,
        event_id: i32,
    ) -> Result<Vec<EventFeedbackEntry>, ApiError> {
        let records = FeedbackRepository::list_for_event(pool, event_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn find(pool: &PgPool, event_id: i32) -> Result<EventRecord, ApiError> {
        EventRepository::find_by_id(pool, event_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(event_not_found)
    }
}

pub(crate) fn event_not_found() -> ApiError {
    ApiError::NotFound("Event not found".to_string())
}
