//! API request and response types

use crate::models::{RegistrationStatus, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default capacity for a new event
pub const DEFAULT_MAX_PARTICIPANTS: i32 = 100;

fn default_max_participants() -> i32 {
    DEFAULT_MAX_PARTICIPANTS
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Generic message body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Users and Authentication
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

/// Login form (`application/x-www-form-urlencoded`)
///
/// The `username` field carries the email address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Full user representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Denormalized user summary returned with tokens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserSummary,
}

/// Token validation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateTokenResponse {
    pub valid: bool,
    pub user: UserSummary,
}

// ============================================================================
// Events
// ============================================================================

/// Event creation request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(max = 50, message = "Category must be at most 50 characters"))]
    pub category: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Date is required"))]
    pub date: String,
    #[validate(length(min = 1, max = 50, message = "Time is required"))]
    pub time: String,
    #[validate(length(min = 1, max = 200, message = "Location must be 1-200 characters"))]
    pub location: String,
    #[serde(default = "default_max_participants")]
    #[validate(range(min = 0, message = "Capacity cannot be negative"))]
    pub max_participants: i32,
}

/// Partial event update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 50, message = "Category must be at most 50 characters"))]
    pub category: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Date cannot be empty"))]
    pub date: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Time cannot be empty"))]
    pub time: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Location must be 1-200 characters"))]
    pub location: Option<String>,
    #[validate(range(min = 0, message = "Capacity cannot be negative"))]
    pub max_participants: Option<i32>,
    pub is_active: Option<bool>,
}

/// Event with its organizer embedded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
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
    pub organizer: UserResponse,
}

/// Event deletion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEventResponse {
    pub message: String,
    pub event_id: i32,
}

// ============================================================================
// Registrations
// ============================================================================

/// Event registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRegistrationRequest {
    pub event_id: i32,
}

/// Registration record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub id: i32,
    pub user_id: i32,
    pub event_id: i32,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventResponse>,
}

/// Registration as listed on an event page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRegistrationEntry {
    pub id: i32,
    pub user_id: i32,
    pub event_id: i32,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
    pub user_name: String,
}

// ============================================================================
// Feedback
// ============================================================================

/// Feedback submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFeedbackRequest {
    pub event_id: i32,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(length(max = 2000, message = "Comments must be at most 2000 characters"))]
    pub comments: Option<String>,
}

/// Feedback record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub id: i32,
    pub user_id: i32,
    pub event_id: i32,
    pub rating: i32,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Feedback as listed on an event page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventFeedbackEntry {
    pub id: i32,
    pub user_id: i32,
    pub event_id: i32,
    pub rating: i32,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
}

// ============================================================================
// Development helpers
// ============================================================================

/// Result of seeding sample data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleDataResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
