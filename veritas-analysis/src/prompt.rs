//! Prompt text sent to the completion service.

use crate::model::AnalysisRequest;

pub const SYSTEM_PROMPT: &str = "You are an expert political analyst and fact-checker. You must respond with valid JSON only, no markdown formatting or code blocks. Never fabricate URLs - set them to null if uncertain.";

const RESPONSE_SHAPE: &str = r#"{
  "intentSummary": "Brief summary of the speaker's intent and positioning",
  "contradictions": [
    {
      "type": "voting_record" | "past_statement" | "donor_influence" | "policy_flip",
      "severity": "high" | "medium" | "low",
      "title": "Short title of the contradiction",
      "description": "Detailed explanation of the contradiction",
      "evidence": "Specific evidence or example"
    }
  ],
  "overallAssessment": {
    "hasContradictions": true | false,
    "confidenceLevel": "high" | "medium" | "low",
    "confidencePercentage": 85,
    "summary": "Overall assessment summary"
  },
  "supportingEvidence": [
    {
      "title": "Title of evidence",
      "description": "Description of the evidence",
      "url": null,
      "source": "Source name (e.g., 'Congress.gov', 'OpenSecrets.org', 'Senate.gov')"
    }
  ],
  "methodology": "Brief explanation of analysis methodology used"
}"#;

const URL_INSTRUCTIONS: &str = "IMPORTANT INSTRUCTIONS FOR URLs:
- For supportingEvidence, ALWAYS set \"url\" to null unless you are absolutely certain about a specific, well-known government URL
- Do NOT fabricate or guess URLs - they must be real and working
- Focus on providing detailed descriptions and authoritative source names instead of URLs
- Only include URLs if they follow these exact patterns:
  * Congress.gov bill pages: https://www.congress.gov/bill/[congress]th-congress/[chamber]-bill/[number]
  * Senate vote records: https://www.senate.gov/legislative/LIS/roll_call_votes/...
  * OpenSecrets member pages: https://www.opensecrets.org/members-of-congress/...
- If unsure about a URL, set it to null and provide a strong source name and description";

const FOCUS: &str = "Focus on:
1. Voting record inconsistencies
2. Past public statements that contradict this position
3. Campaign finance/donor influences that may conflict with stated positions
4. Policy flip-flops or position changes over time
5. Rhetorical techniques used to obscure or mislead

Be factual, objective, and provide specific examples where possible. If you cannot find contradictions, state that clearly.

IMPORTANT: Respond with ONLY the JSON object, no markdown code blocks or additional text.";

/// Build the user message for one request. Inputs are embedded verbatim.
pub fn build_prompt(request: &AnalysisRequest) -> String {
    format!(
        "You are a political fact-checker and analyst. Analyze the following political statement for contradictions, hypocrisy, and inconsistencies.

STATEMENT: \"{statement}\"
SPEAKER: {speaker}
DATE: {date}

Please provide a comprehensive analysis in the following JSON format (respond with ONLY the JSON, no markdown formatting):

{RESPONSE_SHAPE}

{URL_INSTRUCTIONS}

{FOCUS}",
        statement = request.statement,
        speaker = request.speaker,
        date = request.date,
    )
}
