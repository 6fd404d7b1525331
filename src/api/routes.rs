//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::github::GitHubRawClient;
use crate::llm::GeminiClient;
use crate::task::Verifier;

use super::types::*;

/// Shared application state.
pub struct AppState {
    /// Verification pipeline with its upstream clients
    pub verifier: Verifier,
}

/// Build the application router around `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/submit", post(submit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let fetcher = Arc::new(GitHubRawClient::new(
        config.github_raw_base.clone(),
        config.github_branch.clone(),
        config.http_timeout,
    )?);
    let llm = Arc::new(GeminiClient::new(
        config.api_key.clone(),
        config.gemini_api_base.clone(),
        config.http_timeout,
    )?);
    let verifier = Verifier::new(fetcher, llm, config.model.clone());

    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState { verifier });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping server");
}

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.verifier.model().to_string(),
    })
}

/// Verify a submission.
///
/// Upstream AI failures still answer 200; only the submission itself can
/// produce a 400.
async fn submit(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<VerificationRequest>, JsonRejection>,
) -> Result<Json<VerificationResult>, ApiError> {
    let Json(request) = payload?;
    let result = state.verifier.verify(request).await?;

    tracing::info!("Returning response to client");

    Ok(Json(result))
}
