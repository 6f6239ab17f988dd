//! Statement analysis: prompt construction, completion decoding and URL policy.
//!
//! The flow for one request is
//! [`build_prompt`](prompt::build_prompt) → one completion call →
//! [`parse_completion`](parse::parse_completion) →
//! [`ParsedCompletion::into_value`](parse::ParsedCompletion::into_value),
//! wired together by [`StatementAnalyzer`].
//!
//! ```
//! use veritas_analysis::trusted::sanitize_url;
//!
//! let kept = sanitize_url(Some("https://ballotpedia.org/Rick_Scott".into()));
//! assert!(kept.is_some());
//! assert_eq!(sanitize_url(Some("https://example.com/".into())), None);
//! ```
pub mod analyzer;
pub mod model;
pub mod parse;
pub mod prompt;
pub mod trusted;

pub use analyzer::{CompletionSettings, Stage, StatementAnalyzer};
pub use model::{AnalysisRequest, AnalysisResult};
pub use parse::{fallback_result, fallback_value, ParsedCompletion};
