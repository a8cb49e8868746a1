//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod event;
pub mod feedback;
pub mod registration;
pub mod user;

pub use event::{CreateEvent, EventRecord, EventRepository, UpdateEvent};
pub use feedback::{CreateFeedback, EventFeedbackRecord, FeedbackRecord, FeedbackRepository};
pub use registration::{
    CancelOutcome, EventRegistrationRecord, RegisterOutcome, RegistrationRecord,
    RegistrationRepository,
};
pub use user::{NewUser, UserRecord, UserRepository};

/// Whether a sqlx error is a unique constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Same check for errors already wrapped by a repository call
pub fn is_unique_violation_any(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .map(is_unique_violation)
        .unwrap_or(false)
}
