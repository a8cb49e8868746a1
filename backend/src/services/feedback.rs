//! Event feedback service

use super::event::event_not_found;
use crate::error::ApiError;
use crate::repositories::{CreateFeedback, EventRepository, FeedbackRepository, UserRecord};
use gamehub_shared::types::{CreateFeedbackRequest, FeedbackResponse, MessageResponse};
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

/// Feedback service for business logic
pub struct FeedbackService;

impl FeedbackService {
    /// Leave a rating for an existing event
    pub async fn create(
        pool: &PgPool,
        caller: &UserRecord,
        request: CreateFeedbackRequest,
    ) -> Result<FeedbackResponse, ApiError> {
        request.validate()?;

        EventRepository::find_by_id(pool, request.event_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(event_not_found)?;

        let input = CreateFeedback {
            user_id: caller.id,
            event_id: request.event_id,
            rating: request.rating,
            comments: request.comments,
        };

        let record = FeedbackRepository::create(pool, input)
            .await
            .map_err(ApiError::Internal)?;

        info!(feedback_id = record.id, event_id = record.event_id, user_id = caller.id, "Feedback added");
        Ok(record.into())
    }

    /// Remove feedback; authors may remove their own, admins any
    pub async fn delete(
        pool: &PgPool,
        caller: &UserRecord,
        feedback_id: i32,
    ) -> Result<MessageResponse, ApiError> {
        let feedback = FeedbackRepository::find_by_id(pool, feedback_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Feedback not found".to_string()))?;

        if !caller.role().can_delete_feedback(feedback.user_id == caller.id) {
            return Err(ApiError::Forbidden(
                "You can only delete your own feedback".to_string(),
            ));
        }

        FeedbackRepository::delete(pool, feedback_id)
            .await
            .map_err(ApiError::Internal)?;

        info!(feedback_id, user_id = caller.id, "Feedback deleted");
        Ok(MessageResponse {
            message: "Feedback deleted successfully".to_string(),
        })
    }
}
