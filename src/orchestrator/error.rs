use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
/// Failures that stop a scoring pass before any record is visited.
///
/// Per-record failures never surface here; they are reported as
/// [`RecordOutcome::Failed`](super::RecordOutcome::Failed).
pub enum OrchestratorError {
    /// The job description could not be fetched.
    #[error("failed to fetch job description {job_id}: {source}")]
    JobLookup {
        job_id: i64,
        #[source]
        source: StoreError,
    },

    /// The interview listing could not be fetched.
    #[error("failed to list interviews: {source}")]
    InterviewListing {
        #[source]
        source: StoreError,
    },
}

impl OrchestratorError {
    /// HTTP status of the underlying store error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::JobLookup { source, .. } | Self::InterviewListing { source } => source.status(),
        }
    }
}
