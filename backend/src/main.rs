//! GameHub Backend
//!
//! API server for the GameHub event-registration platform.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: Business rules (roles, capacity, ownership)
//! - Repositories: Data access
//! - Database: PostgreSQL with SQLx

use anyhow::Result;
use gamehub_backend::{config, db, routes, shutdown::shutdown_signal, state::AppState};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting GameHub backend"
    );

    if config::AppConfig::is_production() {
        validate_production_config(&config)?;
    }

    info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database.url, config.database.max_connections).await?;

    // Production deployments run migrations as a separate step
    if !config::AppConfig::is_production() {
        db::run_migrations(&db_pool).await?;
    }

    let state = AppState::new(db_pool, config.clone())?;
    let app = routes::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, dev_routes = config.server.enable_dev_routes, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "gamehub_backend=info,tower_http=info".into()
        } else {
            "gamehub_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Validate configuration for production deployment
fn validate_production_config(config: &config::AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.jwt.secret == config::DEVELOPMENT_SECRET || config.jwt.secret.len() < 32 {
        errors.push("JWT secret must be at least 32 characters and not the development default");
    }

    if config.server.enable_dev_routes {
        warn!("Development routes are enabled; sample data can be seeded by anyone");
    }

    if config.password.legacy_digest_fallback {
        warn!("Legacy SHA-256 password fallback is enabled");
    }

    if config.database.url.contains("localhost") || config.database.url.contains("127.0.0.1") {
        warn!("Database URL contains localhost - ensure this is intentional for production");
    }

    if !errors.is_empty() {
        for err in &errors {
            error!("Configuration error: {}", err);
        }
        anyhow::bail!("Invalid production configuration");
    }

    Ok(())
}
