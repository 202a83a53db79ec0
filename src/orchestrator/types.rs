use std::fmt;

use crate::store::{CandidateInfo, JobDescription, StoreError};

/// What happened to one interview record during a pass.
#[derive(Debug)]
pub enum RecordOutcome {
    /// A final score was already stored; nothing was computed or written.
    Existing { score: f64 },
    /// A score was computed and written back.
    Persisted { score: f64 },
    /// A score was computed but the write cycle failed. The stored record is
    /// unchanged and will be picked up again on the next pass.
    Failed { score: f64, error: StoreError },
}

impl RecordOutcome {
    /// The existing or freshly computed score.
    pub fn score(&self) -> f64 {
        match self {
            Self::Existing { score } | Self::Persisted { score } | Self::Failed { score, .. } => {
                *score
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for RecordOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Existing { score } => write!(f, "existing {score:.4}"),
            Self::Persisted { score } => write!(f, "persisted {score:.4}"),
            Self::Failed { score, error } => write!(f, "computed {score:.4}, not saved: {error}"),
        }
    }
}

/// Per-record entry of a [`RunReport`].
#[derive(Debug)]
pub struct RecordReport {
    pub interview_id: i64,
    pub candidate: CandidateInfo,
    pub summary: String,
    pub interview_score: Option<f64>,
    pub outcome: RecordOutcome,
}

impl RecordReport {
    pub fn score(&self) -> f64 {
        self.outcome.score()
    }
}

/// Result of one scoring pass over a job's interviews, in visit order.
#[derive(Debug)]
pub struct RunReport {
    pub job: JobDescription,
    pub records: Vec<RecordReport>,
}

impl RunReport {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose score was written during this pass.
    pub fn persisted(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Persisted { .. }))
    }

    /// Records that already held a final score.
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Existing { .. }))
    }

    /// Records whose write cycle failed.
    pub fn failed(&self) -> usize {
        self.count(RecordOutcome::is_failed)
    }

    fn count(&self, pred: impl Fn(&RecordOutcome) -> bool) -> usize {
        self.records.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Renders a stored summary for display.
///
/// The store encodes paragraph breaks as a single backslash.
pub fn format_summary(text: &str) -> String {
    text.replace('\\', "\n\n").trim().to_string()
}
