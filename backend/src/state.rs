//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! Everything here is built once at startup and read-only afterwards:
//! the pool and config are reference counted, the JWT keys are derived
//! up front and the password service is a small `Copy` value.

use crate::auth::{JwtService, PasswordService};
use crate::config::AppConfig;
use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// JWT service with cached keys
    pub jwt: JwtService,
    /// Password hashing with the configured cost and fallback policy
    pub passwords: PasswordService,
}

impl AppState {
    /// Create a new application state
    ///
    /// Fails when the JWT settings are unusable (for example a non-HMAC
    /// algorithm), so a misconfigured server never starts.
    pub fn new(db: PgPool, config: AppConfig) -> Result<Self> {
        let jwt = JwtService::from_config(&config.jwt)?;
        let passwords = PasswordService::from_config(&config.password);

        Ok(Self {
            db,
            config: Arc::new(config),
            jwt,
            passwords,
        })
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    #[inline]
    pub fn passwords(&self) -> &PasswordService {
        &self.passwords
    }
}
