use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::warn;

use crate::constants::{SIMILARITY_SCORE_FIELD, UNKNOWN_CANDIDATE_EMAIL, UNKNOWN_CANDIDATE_NAME};

use super::error::{StoreError, StoreResult};

/// Interview summary row (`/job_interview`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub id: i64,
    #[serde(rename = "job_desc_id")]
    pub job_id: i64,
    pub candidate_id: i64,
    #[serde(rename = "summary", default)]
    pub summary_text: Option<String>,
    #[serde(default)]
    pub similarity_score: Option<f64>,
    #[serde(default)]
    pub interview_score: Option<f64>,
}

impl InterviewRecord {
    /// Summary text, or `""` when the store holds none.
    pub fn summary(&self) -> &str {
        self.summary_text.as_deref().unwrap_or_default()
    }

    pub fn score_state(&self) -> ScoreState {
        ScoreState::from_stored(self.similarity_score)
    }
}

/// Decodes an interview listing row by row.
///
/// A row that does not decode (e.g. a `null` candidate id) is logged and
/// dropped; it never fails the listing as a whole.
pub fn decode_interview_rows(rows: Vec<Value>) -> Vec<InterviewRecord> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.get("id").cloned().unwrap_or(Value::Null);
            serde_json::from_value(row)
                .inspect_err(|e| {
                    warn!(interview_id = %id, error = %e, "Skipping malformed interview row");
                })
                .ok()
        })
        .collect()
}

/// Job description row (`/job_desc`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    pub id: i64,
    pub role_name: String,
    #[serde(rename = "role_description", default)]
    pub role_text: String,
}

fn unknown_name() -> String {
    UNKNOWN_CANDIDATE_NAME.to_string()
}

fn unknown_email() -> String {
    UNKNOWN_CANDIDATE_EMAIL.to_string()
}

/// Candidate contact details (`/candidate`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateInfo {
    #[serde(default)]
    pub id: i64,
    #[serde(default = "unknown_name")]
    pub name: String,
    #[serde(default = "unknown_email")]
    pub email: String,
}

impl CandidateInfo {
    /// Placeholder used when a candidate cannot be looked up.
    pub fn unknown(id: i64) -> Self {
        Self {
            id,
            name: unknown_name(),
            email: unknown_email(),
        }
    }
}

/// Whether a stored similarity score still has to be computed.
///
/// The store uses both `null` and exactly `0` to mean "not computed yet", so a
/// legitimately computed zero (no vocabulary overlap) is indistinguishable from
/// an unset score and will be recomputed on every pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreState {
    /// Field absent or `null`.
    Missing,
    /// Field holds the `0` sentinel.
    Sentinel,
    /// Any other value. Final: never recomputed or overwritten.
    Scored(f64),
}

impl ScoreState {
    pub fn from_stored(score: Option<f64>) -> Self {
        match score {
            None => Self::Missing,
            Some(s) if s == 0.0 => Self::Sentinel,
            Some(s) => Self::Scored(s),
        }
    }

    pub fn needs_score(&self) -> bool {
        !matches!(self, Self::Scored(_))
    }
}

/// Overwrites `similarity_score` on a full record document, leaving every other
/// field untouched.
pub fn apply_similarity_score(record: &mut Value, id: i64, score: f64) -> StoreResult<()> {
    let path = format!("/job_interview/{id}");

    let number = Number::from_f64(score).ok_or_else(|| StoreError::InvalidRecord {
        path: path.clone(),
        reason: format!("score {score} is not a finite number"),
    })?;

    let fields = record
        .as_object_mut()
        .ok_or_else(|| StoreError::InvalidRecord {
            path,
            reason: "record is not a JSON object".to_string(),
        })?;

    fields.insert(SIMILARITY_SCORE_FIELD.to_string(), Value::Number(number));
    Ok(())
}
