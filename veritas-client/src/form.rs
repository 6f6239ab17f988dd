//! Client-side submission gate.

use chrono::{Local, NaiveDate};
use thiserror::Error;
use veritas_analysis::AnalysisRequest;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub const DEMO_STATEMENT: &str = "We need Medicare to negotiate drug prices";
pub const DEMO_SPEAKER: &str = "Senator Rick Scott";
pub const DEMO_DATE: &str = "2024-03-15";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("statement must not be empty")]
    EmptyStatement,
    #[error("speaker must not be empty")]
    EmptySpeaker,
    #[error("date must be YYYY-MM-DD, got {0:?}")]
    InvalidDate(String),
}

/// Raw form fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementForm {
    pub statement: String,
    pub speaker: String,
    pub date: Option<String>,
}

impl StatementForm {
    pub fn new(
        statement: impl Into<String>,
        speaker: impl Into<String>,
        date: Option<String>,
    ) -> Self {
        Self {
            statement: statement.into(),
            speaker: speaker.into(),
            date,
        }
    }

    /// Sample values for trying the tool out.
    pub fn demo() -> Self {
        Self::new(DEMO_STATEMENT, DEMO_SPEAKER, Some(DEMO_DATE.to_string()))
    }

    pub fn can_submit(&self) -> bool {
        !self.statement.trim().is_empty() && !self.speaker.trim().is_empty()
    }

    /// Validate and produce the request; a blank date becomes `today`.
    pub fn into_request(self, today: NaiveDate) -> Result<AnalysisRequest, FormError> {
        let statement = self.statement.trim();
        if statement.is_empty() {
            return Err(FormError::EmptyStatement);
        }
        let speaker = self.speaker.trim();
        if speaker.is_empty() {
            return Err(FormError::EmptySpeaker);
        }

        let date = match self.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map_err(|_| FormError::InvalidDate(raw.to_string()))?,
            None => today,
        };

        Ok(AnalysisRequest {
            statement: statement.to_string(),
            speaker: speaker.to_string(),
            date: date.format(DATE_FORMAT).to_string(),
        })
    }

    /// [`into_request`](Self::into_request) against the local calendar date.
    pub fn submission(self) -> Result<AnalysisRequest, FormError> {
        self.into_request(Local::now().date_naive())
    }
}
