//! Body extractors whose rejections use the `ApiError` envelope
//!
//! Missing fields, unknown enum variants and malformed bodies become
//! `400 VALIDATION_ERROR` instead of axum's plain-text 422.

use crate::error::ApiError;
use axum::extract::FromRequest;

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// URL-encoded form body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(ApiError))]
pub struct ApiForm<T>(pub T);
