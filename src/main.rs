//! task-checker - HTTP Server Entry Point
//!
//! Starts the HTTP server that verifies task submissions.

use task_checker::{api, config::Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_checker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Loaded configuration: model={} branch={} timeout={:?}",
        config.model, config.github_branch, config.http_timeout
    );

    // Start HTTP server
    info!("Starting server on {}:{}", config.host, config.port);

    api::serve(config).await?;

    Ok(())
}
