//! reflect-api - Emotion reflection analysis service
//!
//! Accepts free-text reflections over HTTP and returns a keyword-derived
//! emotion label with a confidence score.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use reflect_api::api::{cors_layer, BuildInfo};
use reflect_api::{build_router, AppState};
use reflect_common::{ConfigOverrides, ServiceConfig};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for reflect-api
#[derive(Parser, Debug)]
#[command(name = "reflect-api")]
#[command(about = "Emotion reflection analysis service")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, env = "REFLECT_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "REFLECT_PORT")]
    port: Option<u16>,

    /// Allowed CORS origin (repeatable, or comma-separated in the environment)
    #[arg(long = "cors-origin", env = "REFLECT_CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Option<Vec<String>>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "REFLECT_LOG_LEVEL")]
    log_level: Option<String>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Resolved before tracing so the configured level applies
    let config = ServiceConfig::resolve(args.overrides(), args.config.as_deref())
        .context("Failed to resolve configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log level")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before anything can stall startup
    info!("Starting Emotion Reflection API: {}", BuildInfo::CURRENT);
    info!("CORS origins: {}", config.cors_origins.join(", "));

    let cors = cors_layer(&config.cors_origins).context("Failed to build CORS policy")?;
    let app = build_router(AppState::default(), cors);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("reflect-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
