use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use veritas_common::Result;
use veritas_llm::traits::LlmClient;

use crate::model::AnalysisRequest;
use crate::parse::{parse_completion, ParsedCompletion};
use crate::prompt::{build_prompt, SYSTEM_PROMPT};

/// Sampling knobs for the single completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 2000,
        }
    }
}

/// Per-request lifecycle, reported as the `stage` field of log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Prompting,
    AwaitingExternal,
    ParseOk,
    ParseFallback,
    Responded,
    ExternalFailed,
    ErrorResponded,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Received => "received",
            Stage::Prompting => "prompting",
            Stage::AwaitingExternal => "awaiting_external",
            Stage::ParseOk => "parse_ok",
            Stage::ParseFallback => "parse_fallback",
            Stage::Responded => "responded",
            Stage::ExternalFailed => "external_failed",
            Stage::ErrorResponded => "error_responded",
        })
    }
}

/// Runs one statement through the completion service and post-processes the answer.
///
/// Holds no mutable state; share it behind an `Arc` across requests.
pub struct StatementAnalyzer {
    llm: Arc<dyn LlmClient>,
    settings: CompletionSettings,
}

impl StatementAnalyzer {
    pub fn new(llm: Arc<dyn LlmClient>, settings: CompletionSettings) -> Self {
        Self { llm, settings }
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Analyze one statement.
    ///
    /// Returns the model's JSON with untrusted evidence URLs nulled. Errors only
    /// when the completion call itself fails; a completion that is not JSON
    /// comes back as the fallback result.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Value> {
        tracing::info!(
            stage = %Stage::Received,
            statement = %request.statement,
            speaker = %request.speaker,
            date = %request.date,
            "analysis.stage"
        );

        tracing::debug!(stage = %Stage::Prompting, "analysis.stage");
        let prompt = build_prompt(request);

        tracing::debug!(
            stage = %Stage::AwaitingExternal,
            model = %self.llm.model_name(),
            "analysis.stage"
        );
        let completion = match self
            .llm
            .generate(
                &prompt,
                Some(SYSTEM_PROMPT),
                Some(self.settings.max_tokens),
                Some(self.settings.temperature),
            )
            .await
        {
            Ok(completion) => completion,
            Err(e) => {
                tracing::error!(stage = %Stage::ExternalFailed, error = %e, "analysis.stage");
                return Err(e);
            }
        };
        tracing::debug!(raw = %completion.text, "analysis.completion.raw");

        let parsed = parse_completion(&completion.text);
        let stage = if parsed.is_parsed() {
            Stage::ParseOk
        } else {
            Stage::ParseFallback
        };
        if let ParsedCompletion::Unparseable(raw) = &parsed {
            tracing::warn!(stage = %stage, raw = %raw, "analysis.stage");
        } else {
            tracing::debug!(stage = %stage, "analysis.stage");
        }

        let result = parsed.into_value();
        tracing::info!(
            stage = %Stage::Responded,
            has_contradictions = ?result
                .pointer("/overallAssessment/hasContradictions")
                .and_then(serde_json::Value::as_bool),
            contradictions = result
                .get("contradictions")
                .and_then(serde_json::Value::as_array)
                .map_or(0, Vec::len),
            "analysis.stage"
        );
        Ok(result)
    }
}
