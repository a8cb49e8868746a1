//! GameHub Shared Library
//!
//! Types, enums and validation helpers shared by the backend and any
//! client that talks to its API.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

pub use errors::*;
pub use models::{RegistrationStatus, Role};
pub use types::*;
