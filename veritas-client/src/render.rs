//! Plain-text results display.

use std::fmt::Write;
use veritas_analysis::AnalysisResult;

pub fn render_text(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let assessment = &result.overall_assessment;

    let _ = writeln!(out, "Analysis Complete");
    let _ = writeln!(out);
    let _ = writeln!(out, "Intent: {}", result.intent_summary);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Overall: {} ({} confidence, {}%)",
        if assessment.has_contradictions {
            "Contradictions found"
        } else {
            "No contradictions found"
        },
        assessment.confidence_level.as_str(),
        assessment.confidence_percentage
    );
    let _ = writeln!(out, "  {}", assessment.summary);

    if !result.contradictions.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Contradictions:");
        for (i, c) in result.contradictions.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. [{}] [{}] {}",
                i + 1,
                c.kind.label(),
                c.severity.as_str(),
                c.title
            );
            let _ = writeln!(out, "     {}", c.description);
            let _ = writeln!(out, "     Evidence: {}", c.evidence);
        }
    }

    if !result.supporting_evidence.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Supporting evidence:");
        for e in &result.supporting_evidence {
            let _ = writeln!(out, "  - {} ({})", e.title, e.source);
            let _ = writeln!(out, "    {}", e.description);
            if let Some(url) = &e.url {
                let _ = writeln!(out, "    {url}");
            }
        }
    }

    let _ = writeln!(out);
    let _ = write!(out, "Methodology: {}", result.methodology);
    out
}
