//! Feedback repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use gamehub_shared::types::{EventFeedbackEntry, FeedbackResponse};
use sqlx::PgPool;

/// Feedback record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FeedbackRecord {
    pub id: i32,
    pub user_id: i32,
    pub event_id: i32,
    pub rating: i32,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<FeedbackRecord> for FeedbackResponse {
    fn from(f: FeedbackRecord) -> Self {
        Self {
            id: f.id,
            user_id: f.user_id,
            event_id: f.event_id,
            rating: f.rating,
            comments: f.comments,
            created_at: f.created_at,
        }
    }
}

/// Feedback joined with the author's display name
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventFeedbackRecord {
    pub id: i32,
    pub user_id: i32,
    pub event_id: i32,
    pub rating: i32,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
}

impl From<EventFeedbackRecord> for EventFeedbackEntry {
    fn from(f: EventFeedbackRecord) -> Self {
        Self {
            id: f.id,
            user_id: f.user_id,
            event_id: f.event_id,
            rating: f.rating,
            comments: f.comments,
            created_at: f.created_at,
            user_name: f.user_name,
        }
    }
}

/// Input for creating feedback
#[derive(Debug, Clone)]
pub struct CreateFeedback {
    pub user_id: i32,
    pub event_id: i32,
    pub rating: i32,
    pub comments: Option<String>,
}

/// Feedback repository for database operations
pub struct FeedbackRepository;

impl FeedbackRepository {
    /// Create a feedback entry
    pub async fn create(pool: &PgPool, input: CreateFeedback) -> Result<FeedbackRecord> {
        let record = sqlx::query_as::<_, FeedbackRecord>(
            r#"
            INSERT INTO feedback (user_id, event_id, rating, comments)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, event_id, rating, comments, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.event_id)
        .bind(input.rating)
        .bind(&input.comments)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<FeedbackRecord>> {
        let record = sqlx::query_as::<_, FeedbackRecord>(
            r#"
            SELECT id, user_id, event_id, rating, comments, created_at
            FROM feedback
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Feedback for an event with author names, newest first
    pub async fn list_for_event(pool: &PgPool, event_id: i32) -> Result<Vec<EventFeedbackRecord>> {
        let records = sqlx::query_as::<_, EventFeedbackRecord>(
            r#"
            SELECT f.id, f.user_id, f.event_id, f.rating, f.comments, f.created_at,
                   COALESCE(u.name, 'Anonymous') AS user_name
            FROM feedback f
            LEFT JOIN users u ON u.id = f.user_id
            WHERE f.event_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(event_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
