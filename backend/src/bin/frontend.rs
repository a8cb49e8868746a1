//! GameHub frontend development server
//!
//! Serves the static frontend with caching disabled. Unset arguments fall
//! back to the `frontend` section of the application config.

use anyhow::Result;
use clap::Parser;
use gamehub_backend::{
    config::{AppConfig, FrontendConfig},
    frontend,
    shutdown::shutdown_signal,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Static file server for the GameHub frontend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First port to try; the next free one is used if it is taken
    port: Option<u16>,

    /// Host to bind
    host: Option<String>,

    /// Directory containing index.html
    #[arg(long, env = "GH_FRONTEND_DIR")]
    dir: Option<PathBuf>,

    /// Backend URL shown in the banner
    #[arg(long, env = "GH_FRONTEND_API_URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "gamehub_frontend=info,gamehub_backend=info,tower_http=info".into()
        }))
        .with(fmt::layer())
        .init();

    let defaults = match AppConfig::load() {
        Ok(config) => config.frontend,
        Err(e) => {
            warn!("Could not load configuration, using defaults: {}", e);
            FrontendConfig::default()
        }
    };

    let host = args.host.unwrap_or(defaults.host);
    let start_port = args.port.unwrap_or(defaults.port);
    let dir = args.dir.unwrap_or_else(|| PathBuf::from(defaults.dir));
    let api_url = args.api_url.unwrap_or(defaults.api_url);

    let dir = frontend::check_structure(&dir)?;
    let (listener, port) = frontend::bind_first_free(&host, start_port).await?;

    if port != start_port {
        warn!(requested = start_port, port, "Port in use, using the next free one");
    }

    let base_url = format!("http://{}:{}", host, port);
    info!("GameHub frontend server");
    info!("  URL:       {}", base_url);
    info!("  Directory: {}", dir.display());
    info!("  Backend:   {}", api_url);
    for page in frontend::KEY_PAGES {
        info!("  {}/{}", base_url, page);
    }
    info!("Press Ctrl+C to stop");

    axum::serve(listener, frontend::router(&dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Frontend server stopped");
    Ok(())
}
