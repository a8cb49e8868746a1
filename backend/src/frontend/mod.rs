//! Static file server for the frontend during development
//!
//! Serves the frontend directory with permissive CORS and caching turned
//! off, so edits show up on reload and pages can call the API on another
//! port.

use anyhow::{Context, Result};
use axum::{
    http::{
        header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, EXPIRES, PRAGMA},
        HeaderValue, Method,
    },
    Router,
};
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::debug;

/// How many consecutive ports are tried before giving up
pub const PORT_SEARCH_RANGE: u16 = 100;

/// Pages listed in the startup banner
pub const KEY_PAGES: &[&str] = &[
    "index.html",
    "pages/auth/login.html",
    "pages/player/browse-events.html",
    "pages/organizer/create-event.html",
];

/// Fail unless `dir` is a directory containing `index.html`
pub fn check_structure(dir: &Path) -> Result<PathBuf> {
    if !dir.is_dir() {
        anyhow::bail!("Frontend directory not found: {}", dir.display());
    }

    let index = dir.join("index.html");
    if !index.is_file() {
        anyhow::bail!("index.html not found in {}", dir.display());
    }

    dir.canonicalize()
        .with_context(|| format!("Failed to resolve {}", dir.display()))
}

/// Bind the first free port in `[start, start + PORT_SEARCH_RANGE)`
pub async fn bind_first_free(host: &str, start: u16) -> Result<(TcpListener, u16)> {
    let end = start.saturating_add(PORT_SEARCH_RANGE);

    for port in start..end {
        match TcpListener::bind((host, port)).await {
            Ok(listener) => {
                let bound = listener.local_addr()?.port();
                return Ok((listener, bound));
            }
            Err(e) => debug!(port, error = %e, "Port unavailable"),
        }
    }

    anyhow::bail!("No free port between {} and {} on {}", start, end - 1, host)
}

/// Router serving `dir` with CORS and no-cache headers
pub fn router(dir: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            EXPIRES,
            HeaderValue::from_static("0"),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([CONTENT_TYPE, AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
}
