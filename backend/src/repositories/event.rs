//! Event repository for database operations
//!
//! Every read joins the organizer so responses can embed it.

use anyhow::Result;
use chrono::{DateTime, Utc};
use gamehub_shared::types::{EventResponse, UserResponse};
use gamehub_shared::Role;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use tracing::warn;

/// Event row joined with its organizer
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: String,
    pub time: String,
    pub location: String,
    pub max_participants: i32,
    pub organizer_id: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub organizer_name: String,
    pub organizer_email: String,
    pub organizer_role: String,
    pub organizer_is_active: bool,
    pub organizer_created_at: DateTime<Utc>,
}

impl From<EventRecord> for EventResponse {
    fn from(e: EventRecord) -> Self {
        Self {
            id: e.id,
            title: e.title,
            description: e.description,
            category: e.category,
            date: e.date,
            time: e.time,
            location: e.location,
            max_participants: e.max_participants,
            organizer_id: e.organizer_id,
            is_active: e.is_active,
            created_at: e.created_at,
            organizer: UserResponse {
                id: e.organizer_id,
                name: e.organizer_name,
                email: e.organizer_email,
                role: e.organizer_role.parse().unwrap_or(Role::Player),
                is_active: e.organizer_is_active,
                created_at: e.organizer_created_at,
            },
        }
    }
}

/// Input for creating an event
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: String,
    pub time: String,
    pub location: String,
    pub max_participants: i32,
    pub organizer_id: i32,
}

/// Input for updating an event; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub max_participants: Option<i32>,
    pub is_active: Option<bool>,
}

const EVENT_COLUMNS: &str = r#"
    e.id, e.title, e.description, e.category, e.date, e.time, e.location,
    e.max_participants, e.organizer_id, e.is_active, e.created_at,
    u.name AS organizer_name, u.email AS organizer_email, u.role AS organizer_role,
    u.is_active AS organizer_is_active, u.created_at AS organizer_created_at
"#;

/// Event repository for database operations
pub struct EventRepository;

impl EventRepository {
    /// Create a new event
    pub async fn create<'e, E: PgExecutor<'e>>(executor: E, input: CreateEvent) -> Result<EventRecord> {
        let sql = format!(
            r#"
            WITH e AS (
                INSERT INTO events
                    (title, description, category, date, time, location, max_participants, organizer_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
            )
            SELECT {EVENT_COLUMNS}
            FROM e JOIN users u ON u.id = e.organizer_id
            "#
        );

        let record = sqlx::query_as::<_, EventRecord>(&sql)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.date)
            .bind(&input.time)
            .bind(&input.location)
            .bind(input.max_participants)
            .bind(input.organizer_id)
            .fetch_one(executor)
            .await?;

        Ok(record)
    }

    /// Find an event by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<EventRecord>> {
        let sql = format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events e JOIN users u ON u.id = e.organizer_id
            WHERE e.id = $1
            "#
        );

        let record = sqlx::query_as::<_, EventRecord>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    /// List active events, soonest first
    pub async fn list_active(pool: &PgPool) -> Result<Vec<EventRecord>> {
        let sql = format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events e JOIN users u ON u.id = e.organizer_id
            WHERE e.is_active = TRUE
            ORDER BY e.date ASC, e.time ASC, e.id ASC
            "#
        );

        let records = sqlx::query_as::<_, EventRecord>(&sql)
            .fetch_all(pool)
            .await?;

        Ok(records)
    }

    /// List every event (active or not) organized by a user
    pub async fn list_by_organizer(pool: &PgPool, organizer_id: i32) -> Result<Vec<EventRecord>> {
        let sql = format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events e JOIN users u ON u.id = e.organizer_id
            WHERE e.organizer_id = $1
            ORDER BY e.created_at DESC
            "#
        );

        let records = sqlx::query_as::<_, EventRecord>(&sql)
            .bind(organizer_id)
            .fetch_all(pool)
            .await?;

        Ok(records)
    }

    /// Apply a partial update
    pub async fn update(
        pool: &PgPool,
        id: i32,
        updates: UpdateEvent,
    ) -> Result<Option<EventRecord>> {
        let sql = format!(
            r#"
            WITH e AS (
                UPDATE events SET
                    title = COALESCE($2, title),
                    description = COALESCE($3, description),
                    category = COALESCE($4, category),
                    "date" = COALESCE($5, "date"),
                    "time" = COALESCE($6, "time"),
                    location = COALESCE($7, location),
                    max_participants = COALESCE($8, max_participants),
                    is_active = COALESCE($9, is_active)
                WHERE id = $1
                RETURNING *
            )
            SELECT {EVENT_COLUMNS}
            FROM e JOIN users u ON u.id = e.organizer_id
            "#
        );

        let record = sqlx::query_as::<_, EventRecord>(&sql)
            .bind(id)
            .bind(updates.title)
            .bind(updates.description)
            .bind(updates.category)
            .bind(updates.date)
            .bind(updates.time)
            .bind(updates.location)
            .bind(updates.max_participants)
            .bind(updates.is_active)
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    /// Delete an event together with its registrations and feedback
    ///
    /// Runs in one transaction that is explicitly rolled back on failure.
    /// Returns false when the event did not exist.
    pub async fn delete_cascade(pool: &PgPool, id: i32) -> Result<bool> {
        let mut tx = pool.begin().await?;

        match Self::delete_in_tx(&mut tx, id).await {
            Ok(deleted) => {
                tx.commit().await?;
                Ok(deleted)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(event_id = id, error = %rollback_err, "Rollback after failed delete also failed");
                }
                Err(e)
            }
        }
    }

    async fn delete_in_tx(tx: &mut Transaction<'_, Postgres>, id: i32) -> Result<bool> {
        sqlx::query("DELETE FROM registrations WHERE event_id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;

        sqlx::query("DELETE FROM feedback WHERE event_id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;

        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
