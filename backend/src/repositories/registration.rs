//! Registration repository for database operations
//!
//! Registering and cancelling both touch the event's remaining capacity, so
//! each runs in a single transaction. The capacity decrement is a
//! conditional update that only succeeds while a slot remains, which keeps
//! concurrent registrations from overselling an event.

use super::is_unique_violation;
use anyhow::Result;
use chrono::{DateTime, Utc};
use gamehub_shared::types::{EventRegistrationEntry, RegistrationResponse};
use gamehub_shared::RegistrationStatus;
use sqlx::PgPool;

/// Registration record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RegistrationRecord {
    pub id: i32,
    pub user_id: i32,
    pub event_id: i32,
    pub status: String,
    pub registered_at: DateTime<Utc>,
}

impl RegistrationRecord {
    pub fn status(&self) -> RegistrationStatus {
        self.status.parse().unwrap_or(RegistrationStatus::Cancelled)
    }
}

impl From<RegistrationRecord> for RegistrationResponse {
    fn from(r: RegistrationRecord) -> Self {
        let status = r.status();
        Self {
            id: r.id,
            user_id: r.user_id,
            event_id: r.event_id,
            status,
            registered_at: r.registered_at,
            event: None,
        }
    }
}

/// Registration joined with the registrant's display name
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRegistrationRecord {
    pub id: i32,
    pub user_id: i32,
    pub event_id: i32,
    pub status: String,
    pub registered_at: DateTime<Utc>,
    pub user_name: String,
}

impl From<EventRegistrationRecord> for EventRegistrationEntry {
    fn from(r: EventRegistrationRecord) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            event_id: r.event_id,
            status: r.status.parse().unwrap_or(RegistrationStatus::Cancelled),
            registered_at: r.registered_at,
            user_name: r.user_name,
        }
    }
}

/// Result of a registration attempt
#[derive(Debug)]
pub enum RegisterOutcome {
    Registered(RegistrationRecord),
    EventNotFound,
    NoCapacity,
    AlreadyRegistered,
}

/// Result of a cancellation attempt
#[derive(Debug)]
pub enum CancelOutcome {
    Cancelled(RegistrationRecord),
    NotFound,
    NotOwner,
    AlreadyCancelled,
}

/// Registration repository for database operations
pub struct RegistrationRepository;

impl RegistrationRepository {
    /// Register a user for an event, taking one slot of capacity
    ///
    /// Every early return drops the transaction, which rolls back any
    /// capacity already taken.
    pub async fn register(pool: &PgPool, user_id: i32, event_id: i32) -> Result<RegisterOutcome> {
        let mut tx = pool.begin().await?;

        let event_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM events WHERE id = $1)",
        )
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await?;

        if !event_exists {
            return Ok(RegisterOutcome::EventNotFound);
        }

        // Row lock on the event serializes concurrent registrations
        let slot = sqlx::query(
            r#"
            UPDATE events
            SET max_participants = max_participants - 1
            WHERE id = $1 AND max_participants > 0
            "#,
        )
        .bind(event_id)
        .execute(&mut *tx)
        .await?;

        if slot.rows_affected() == 0 {
            return Ok(RegisterOutcome::NoCapacity);
        }

        let already_registered = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM registrations
                WHERE user_id = $1 AND event_id = $2 AND status = 'registered'
            )
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_registered {
            return Ok(RegisterOutcome::AlreadyRegistered);
        }

        let inserted = sqlx::query_as::<_, RegistrationRecord>(
            r#"
            INSERT INTO registrations (user_id, event_id, status)
            VALUES ($1, $2, 'registered')
            RETURNING id, user_id, event_id, status, registered_at
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(record) => {
                tx.commit().await?;
                Ok(RegisterOutcome::Registered(record))
            }
            // Lost a race against the same user's concurrent request
            Err(e) if is_unique_violation(&e) => Ok(RegisterOutcome::AlreadyRegistered),
            Err(e) => Err(e.into()),
        }
    }

    /// Cancel the caller's registration and return its slot
    pub async fn cancel(pool: &PgPool, registration_id: i32, user_id: i32) -> Result<CancelOutcome> {
        let mut tx = pool.begin().await?;

        let existing = sqlx::query_as::<_, RegistrationRecord>(
            r#"
            SELECT id, user_id, event_id, status, registered_at
            FROM registrations
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(registration_id)
        .fetch_optional(&mut *tx)
        .await?;

        let existing = match existing {
            Some(r) => r,
            None => return Ok(CancelOutcome::NotFound),
        };

        if existing.user_id != user_id {
            return Ok(CancelOutcome::NotOwner);
        }
        if existing.status() == RegistrationStatus::Cancelled {
            return Ok(CancelOutcome::AlreadyCancelled);
        }

        let record = sqlx::query_as::<_, RegistrationRecord>(
            r#"
            UPDATE registrations SET status = 'cancelled'
            WHERE id = $1
            RETURNING id, user_id, event_id, status, registered_at
            "#,
        )
        .bind(registration_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE events SET max_participants = max_participants + 1 WHERE id = $1")
            .bind(existing.event_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(CancelOutcome::Cancelled(record))
    }

    /// All registrations of a user, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: i32) -> Result<Vec<RegistrationRecord>> {
        let records = sqlx::query_as::<_, RegistrationRecord>(
            r#"
            SELECT id, user_id, event_id, status, registered_at
            FROM registrations
            WHERE user_id = $1
            ORDER BY registered_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Registrations for an event with registrant names
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: i32,
    ) -> Result<Vec<EventRegistrationRecord>> {
        let records = sqlx::query_as::<_, EventRegistrationRecord>(
            r#"
            SELECT r.id, r.user_id, r.event_id, r.status, r.registered_at,
                   COALESCE(u.name, 'Anonymous Player') AS user_name
            FROM registrations r
            LEFT JOIN users u ON u.id = r.user_id
            WHERE r.event_id = $1
            ORDER BY r.registered_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
