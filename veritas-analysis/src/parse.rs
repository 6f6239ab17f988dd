//! Best-effort decoding of completion text.
//!
//! Any JSON the model returns is kept as a [`Value`] and handed back with only
//! the evidence URLs touched; the typed [`AnalysisResult`] describes the shape
//! the prompt asks for but is not enforced here. Text that is not JSON at all
//! becomes [`ParsedCompletion::Unparseable`], and callers turn that into the
//! fixed [`fallback_result`] instead of surfacing an error.

use serde_json::Value;

use crate::model::{
    AnalysisResult, ConfidenceLevel, Contradiction, ContradictionKind, OverallAssessment,
    Severity,
};
use crate::trusted::sanitize_evidence_urls;

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedCompletion {
    Parsed(Value),
    /// Carries the raw completion text for logging.
    Unparseable(String),
}

impl ParsedCompletion {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParsedCompletion::Parsed(_))
    }

    /// Body handed back to the caller: the model's JSON with untrusted URLs
    /// nulled, or the fallback.
    pub fn into_value(self) -> Value {
        match self {
            ParsedCompletion::Parsed(mut value) => {
                sanitize_evidence_urls(&mut value);
                value
            }
            ParsedCompletion::Unparseable(_) => fallback_value(),
        }
    }
}

/// Trim, then drop a leading ```` ```json ```` / ```` ``` ```` fence and a
/// trailing ```` ``` ```` fence, each with one adjacent newline.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut cleaned = raw.trim();

    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest.strip_prefix('\n').unwrap_or(rest);
    }
    if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest.strip_prefix('\n').unwrap_or(rest);
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest.strip_suffix('\n').unwrap_or(rest);
    }
    cleaned
}

pub fn parse_completion(raw: &str) -> ParsedCompletion {
    let cleaned = strip_code_fences(raw);
    tracing::debug!(cleaned = %cleaned, "analysis.completion.cleaned");

    match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => {
            if serde_json::from_value::<AnalysisResult>(value.clone()).is_err() {
                tracing::debug!("analysis.completion.off_schema");
            }
            ParsedCompletion::Parsed(value)
        }
        Err(e) => {
            tracing::warn!(
                serde_line = e.line(),
                serde_col = e.column(),
                serde_err = %e,
                "analysis.completion.unparseable"
            );
            ParsedCompletion::Unparseable(raw.to_string())
        }
    }
}

/// Fixed low-confidence result returned when a completion cannot be decoded.
pub fn fallback_result() -> AnalysisResult {
    AnalysisResult {
        intent_summary:
            "Analysis could not be completed due to response formatting issues. Please try again."
                .to_string(),
        contradictions: vec![Contradiction {
            kind: ContradictionKind::AnalysisError,
            severity: Severity::Low,
            title: "Analysis Format Error".to_string(),
            description: "The AI response could not be parsed properly. Please try again."
                .to_string(),
            evidence: "System error in response formatting".to_string(),
        }],
        overall_assessment: OverallAssessment {
            has_contradictions: false,
            confidence_level: ConfidenceLevel::Low,
            confidence_percentage: 0,
            summary: "Analysis could not be completed due to formatting error".to_string(),
        },
        supporting_evidence: Vec::new(),
        methodology: "Error in analysis processing".to_string(),
    }
}

/// [`fallback_result`] in wire form.
pub fn fallback_value() -> Value {
    // Plain strings, enums and integers only; serializing cannot fail.
    serde_json::to_value(fallback_result()).unwrap_or_default()
}
