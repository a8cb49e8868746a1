//! JWT token issuance and validation
//!
//! Tokens are stateless: the server keeps no record of issued tokens and
//! a token is valid until its `exp` passes or its signature stops matching.

use crate::config::JwtConfig;
use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde_json::{Map, Value};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Lifetime applied by `issue` when the caller passes no ttl
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 15;

/// Reasons a token is rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("subject claim missing or not a string")]
    MissingSubject,
}

/// Validated token claims
#[derive(Debug, Clone, PartialEq)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Any other claims the issuer added
    pub extra: Map<String, Value>,
}

/// Pre-computed JWT keys
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service for token operations
///
/// Built once at startup and shared through `AppState`; cloning is cheap.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    algorithm: Algorithm,
    access_token_ttl: Duration,
}

impl JwtService {
    /// Create a JWT service for an HMAC algorithm (HS256, HS384, HS512)
    pub fn new(secret: &str, algorithm: &str, access_token_expire_minutes: i64) -> Result<Self> {
        let algorithm = Algorithm::from_str(algorithm)
            .map_err(|e| anyhow::anyhow!("Unknown JWT algorithm {}: {}", algorithm, e))?;

        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            anyhow::bail!("JWT algorithm {:?} is not a symmetric HMAC algorithm", algorithm);
        }

        Ok(Self {
            keys: JwtKeys::new(secret),
            algorithm,
            access_token_ttl: Duration::minutes(access_token_expire_minutes),
        })
    }

    pub fn from_config(config: &JwtConfig) -> Result<Self> {
        Self::new(
            &config.secret,
            &config.algorithm,
            config.access_token_expire_minutes,
        )
    }

    /// Sign a claim set, adding `exp` = now + ttl (15 minutes if `None`)
    pub fn issue(&self, mut claims: Map<String, Value>, ttl: Option<Duration>) -> Result<String> {
        let ttl = ttl.unwrap_or_else(|| Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES));
        let exp = Utc::now() + ttl;
        claims.insert("exp".to_string(), Value::from(exp.timestamp()));

        encode(&Header::new(self.algorithm), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to generate token: {}", e))
    }

    /// Issue a login token for `email` with the configured lifetime
    pub fn issue_access_token(&self, email: &str) -> Result<String> {
        let mut claims = Map::new();
        claims.insert("sub".to_string(), Value::from(email));
        self.issue(claims, Some(self.access_token_ttl))
    }

    /// Verify signature and expiry, then extract the subject
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let data = decode::<Map<String, Value>>(token, self.keys.decoding(), &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        let mut extra = data.claims;

        let exp = extra
            .remove("exp")
            .and_then(|v| v.as_i64())
            .ok_or_else(|| TokenError::Malformed("exp claim is not an integer".to_string()))?;

        // A token is only valid strictly before its expiry instant
        if exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        let sub = match extra.remove("sub") {
            Some(Value::String(sub)) => sub,
            _ => return Err(TokenError::MissingSubject),
        };

        Ok(Claims { sub, exp, extra })
    }
}
