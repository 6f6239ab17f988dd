//! Request and result shapes exchanged with the form and the completion service.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One statement submitted for analysis.
///
/// Server side every field is opaque text: a missing or `null` field becomes
/// the empty string and any other non-string JSON value keeps its JSON text.
/// The prompt therefore shows an absent speaker as `SPEAKER: ` rather than a
/// placeholder such as `undefined` or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default, deserialize_with = "opaque_text")]
    pub statement: String,
    #[serde(default, deserialize_with = "opaque_text")]
    pub speaker: String,
    #[serde(default, deserialize_with = "opaque_text")]
    pub date: String,
}

fn opaque_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContradictionKind {
    VotingRecord,
    PastStatement,
    DonorInfluence,
    PolicyFlip,
    /// Only produced by the fallback result.
    AnalysisError,
}

impl ContradictionKind {
    pub fn label(self) -> &'static str {
        match self {
            ContradictionKind::VotingRecord => "Voting Record",
            ContradictionKind::PastStatement => "Past Statement",
            ContradictionKind::DonorInfluence => "Donor Influence",
            ContradictionKind::PolicyFlip => "Policy Flip",
            ContradictionKind::AnalysisError => "Analysis Error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl ConfidenceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contradiction {
    #[serde(rename = "type")]
    pub kind: ContradictionKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub evidence: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallAssessment {
    pub has_contradictions: bool,
    pub confidence_level: ConfidenceLevel,
    /// 0..=100 as requested in the prompt.
    pub confidence_percentage: u8,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportingEvidence {
    pub title: String,
    pub description: String,
    /// Always serialized; `null` unless it matched a trusted pattern.
    #[serde(default)]
    pub url: Option<String>,
    pub source: String,
}

/// Typed view of an analysis as the prompt asks for it.
///
/// The handler returns the model's JSON as-is; this shape is what the client
/// decodes and renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub intent_summary: String,
    pub contradictions: Vec<Contradiction>,
    pub overall_assessment: OverallAssessment,
    pub supporting_evidence: Vec<SupportingEvidence>,
    pub methodology: String,
}
