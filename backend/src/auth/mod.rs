//! Authentication module
//!
//! Provides JWT bearer authentication with bcrypt password hashing and
//! verification of legacy SHA-256 digests.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtKeys, JwtService, TokenError, DEFAULT_TOKEN_TTL_MINUTES};
pub use middleware::{extract_bearer_token, resolve_user, AuthUser};
pub use password::{HashAlgorithm, PasswordService, MAX_PASSWORD_BYTES};
