//! HTTP surface for statement analysis.
//!
//! `POST /` (alias `/analyze-political-statement`) runs one analysis,
//! `OPTIONS` on the same paths answers pre-flight requests, and
//! `GET /health` reports liveness. Every response carries permissive
//! cross-origin headers.

pub mod error;
pub mod routes;

use anyhow::Context;
use axum::{
    Router,
    http::{HeaderValue, header},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use veritas_analysis::StatementAnalyzer;

pub const ANALYZE_PATH: &str = "/analyze-political-statement";
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Application state shared across handlers
pub struct AppState {
    pub analyzer: StatementAnalyzer,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health_check))
        .route(
            "/",
            post(routes::analyze_statement).options(routes::preflight),
        )
        .route(
            ANALYZE_PATH,
            post(routes::analyze_statement).options(routes::preflight),
        )
        // CORS
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        // Tracing
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(addr = %listener.local_addr()?, model = %state.analyzer.model_name(), "server.listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "server.ctrl_c.unavailable");
        std::future::pending::<()>().await;
    }
    tracing::info!("server.shutdown");
}
