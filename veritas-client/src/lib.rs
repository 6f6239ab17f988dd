//! Command-line counterpart of the statement form.
//!
//! [`StatementForm`] gates submission (non-empty statement and speaker,
//! ISO date defaulting to today), [`AnalysisClient`] sends one request per
//! valid submission, and [`render_text`] prints the result.
pub mod form;
pub mod render;
pub mod submit;

pub use form::{FormError, StatementForm};
pub use render::render_text;
pub use submit::{AnalysisClient, SubmitError};

/// Shown while a submission is outstanding.
pub const BUSY_MESSAGE: &str =
    "Analyzing statement against voting records, donations, and past statements...";
