//! Route handlers

use crate::AppState;
use crate::error::ApiError;
use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use veritas_analysis::AnalysisRequest;
use veritas_common::VeritasError;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Pre-flight: empty 200, CORS headers come from the router layers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// The body is decoded here rather than by the `Json` extractor so that an
/// unreadable payload gets the same 500 shape as any other failure.
pub async fn analyze_statement(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request: AnalysisRequest = serde_json::from_slice(&body)
        .map_err(|e| VeritasError::InvalidRequest(e.to_string()))?;

    let result = state.analyzer.analyze(&request).await?;
    Ok(Json(result))
}
