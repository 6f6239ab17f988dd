use thiserror::Error;
use veritas_analysis::AnalysisResult;
use veritas_http::{HttpClient, HttpError};

use crate::form::{FormError, StatementForm};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error("analysis failed: {0}")]
    Failed(String),
}

/// Posts validated forms to the analysis handler.
pub struct AnalysisClient {
    http: HttpClient,
    path: String,
}

impl AnalysisClient {
    /// `endpoint` is the handler URL, e.g. `http://127.0.0.1:8787/`.
    pub fn new(endpoint: &str) -> Result<Self, SubmitError> {
        let (base, path) = split_endpoint(endpoint);
        let http = HttpClient::new(base).map_err(|e| SubmitError::Failed(e.to_string()))?;
        Ok(Self {
            http,
            path: path.to_string(),
        })
    }

    /// Validate `form` and send exactly one request. An invalid form never
    /// reaches the network.
    pub async fn submit(&self, form: StatementForm) -> Result<AnalysisResult, SubmitError> {
        let request = form.submission()?;
        tracing::info!(speaker = %request.speaker, date = %request.date, "client.submit");

        self.http
            .post_json(&self.path, None, &request)
            .await
            .map_err(|e| {
                let message = match e {
                    HttpError::Api { message, .. } => message,
                    other => other.to_string(),
                };
                tracing::warn!(message = %message, "client.submit.failed");
                SubmitError::Failed(message)
            })
    }
}

/// Split a handler URL into the transport base and the final path segment.
fn split_endpoint(endpoint: &str) -> (&str, &str) {
    let authority_start = endpoint.find("://").map(|i| i + 3).unwrap_or(0);
    match endpoint[authority_start..].rfind('/') {
        Some(i) => endpoint.split_at(authority_start + i + 1),
        None => (endpoint, ""),
    }
}
