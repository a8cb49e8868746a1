//! Domain enums and authorization rules for GameHub

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role
///
/// Stored as lowercase text in the `users.role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Player,
    Organizer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Player => "player",
            Role::Organizer => "organizer",
            Role::Admin => "admin",
        }
    }

    /// Organizers and admins may publish events.
    pub fn can_create_event(&self) -> bool {
        matches!(self, Role::Organizer | Role::Admin)
    }

    /// Admins may delete any event; organizers only their own.
    pub fn can_delete_event(&self, is_owner: bool) -> bool {
        match self {
            Role::Admin => true,
            Role::Organizer => is_owner,
            Role::Player => false,
        }
    }

    /// Same rule as deletion: owner organizer or any admin.
    pub fn can_manage_event(&self, is_owner: bool) -> bool {
        self.can_delete_event(is_owner)
    }

    /// Whether the "my events" listing is available to this role
    pub fn can_list_own_events(&self) -> bool {
        self.can_create_event()
    }

    /// Feedback can be removed by its author or by an admin.
    pub fn can_delete_feedback(&self, is_author: bool) -> bool {
        is_author || matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player" => Ok(Role::Player),
            "organizer" => Ok(Role::Organizer),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Registration lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    #[default]
    Registered,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "registered",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(RegistrationStatus::Registered),
            "cancelled" => Ok(RegistrationStatus::Cancelled),
            _ => Err(format!("Unknown registration status: {}", s)),
        }
    }
}
