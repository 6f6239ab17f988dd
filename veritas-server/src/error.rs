use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use veritas_analysis::Stage;
use veritas_common::VeritasError;

/// Body of every failed analysis.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// Any failure once a request reached the handler: always a 500 with [`ErrorBody`].
pub struct ApiError(VeritasError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(stage = %Stage::ErrorResponded, error = %self.0, "analysis.stage");
        let body = ErrorBody {
            error: "Analysis failed".to_string(),
            message: self.0.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl From<VeritasError> for ApiError {
    fn from(err: VeritasError) -> Self {
        Self(err)
    }
}
