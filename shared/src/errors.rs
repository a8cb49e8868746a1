//! Error types shared between the backend and its clients

use thiserror::Error;

/// Authentication error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Missing authorization header")]
    MissingToken,

    #[error("Invalid authorization format")]
    InvalidScheme,
}
