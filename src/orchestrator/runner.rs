use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::limiter::{Pacing, RateLimiter};
use crate::scoring::SimilarityScorer;
use crate::store::{
    InterviewRecord, JobDescription, RecordStore, ScoreState, StoreResult, apply_similarity_score,
};

use super::candidates::CandidateDirectory;
use super::error::OrchestratorError;
use super::types::{RecordOutcome, RecordReport, RunReport};

/// Drives scoring passes for one record store.
///
/// A pass visits every interview of a job once, newest first, and is
/// strictly sequential. Per-pass state (the candidate directory) lives only
/// inside [`run`](Self::run); the limiters persist across passes.
pub struct ScoreOrchestrator {
    store: Arc<dyn RecordStore>,
    scorer: SimilarityScorer,
    write_limiter: RateLimiter,
    record_limiter: RateLimiter,
}

impl ScoreOrchestrator {
    pub fn new(store: Arc<dyn RecordStore>, scorer: SimilarityScorer, pacing: Pacing) -> Self {
        Self {
            store,
            scorer,
            write_limiter: RateLimiter::new(pacing.write),
            record_limiter: RateLimiter::new(pacing.record),
        }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    /// Scores every interview of `job_id` that does not hold a final score.
    ///
    /// Fails only if the job or the interview listing cannot be fetched.
    pub async fn run(&self, job_id: i64) -> Result<RunReport, OrchestratorError> {
        let job = self.store.get_job(job_id).await.map_err(|source| {
            error!(job_id, error = %source, "Failed to fetch job description");
            OrchestratorError::JobLookup { job_id, source }
        })?;

        let interviews = self.store.list_interviews().await.map_err(|source| {
            error!(job_id, error = %source, "Failed to list interviews");
            OrchestratorError::InterviewListing { source }
        })?;
        let interviews = select_for_job(interviews, job_id);

        info!(
            job_id,
            role = %job.role_name,
            count = interviews.len(),
            "Starting scoring pass"
        );

        let mut candidates = CandidateDirectory::new();
        let mut records = Vec::with_capacity(interviews.len());

        for interview in interviews {
            self.record_limiter.acquire().await;

            let candidate = candidates
                .resolve(self.store.as_ref(), interview.candidate_id)
                .await;
            let outcome = self.process(&job, &interview).await;

            records.push(RecordReport {
                interview_id: interview.id,
                candidate,
                summary: interview.summary().to_string(),
                interview_score: interview.interview_score,
                outcome,
            });
        }

        let report = RunReport { job, records };
        info!(
            job_id,
            persisted = report.persisted(),
            skipped = report.skipped(),
            failed = report.failed(),
            candidates = candidates.len(),
            "Scoring pass finished"
        );
        Ok(report)
    }

    async fn process(&self, job: &JobDescription, interview: &InterviewRecord) -> RecordOutcome {
        let state = interview.score_state();
        if let ScoreState::Scored(score) = state {
            debug!(interview_id = interview.id, score, "Score already present");
            return RecordOutcome::Existing { score };
        }

        let score = self.scorer.predict(interview.summary(), &job.role_text);
        debug!(interview_id = interview.id, ?state, score, "Computed similarity");
        if score == 0.0 {
            warn!(
                interview_id = interview.id,
                "Computed similarity is zero; it reads as unscored and will be recomputed next pass"
            );
        }

        match self.persist_score(interview.id, score).await {
            Ok(()) => {
                info!(interview_id = interview.id, score, "Persisted similarity score");
                RecordOutcome::Persisted { score }
            }
            Err(error) => RecordOutcome::Failed { score, error },
        }
    }

    /// Writes `score` to interview `id` with one read-modify-write cycle.
    ///
    /// The full record is fetched, only `similarity_score` is replaced, and the
    /// whole document is sent back. Nothing is written if the fetch fails.
    pub async fn persist_score(&self, id: i64, score: f64) -> StoreResult<()> {
        self.write_limiter.acquire().await;

        let mut record = self.store.get_interview_raw(id).await.inspect_err(|e| {
            error!(interview_id = id, status = ?e.status(), error = %e, "Failed to fetch interview for update");
        })?;

        apply_similarity_score(&mut record, id, score)?;

        self.store
            .patch_interview_raw(id, &record)
            .await
            .inspect_err(|e| {
                error!(interview_id = id, status = ?e.status(), error = %e, "Failed to write similarity score");
            })
    }
}

/// Keeps the interviews of `job_id`, newest first, one entry per id.
pub(super) fn select_for_job(mut interviews: Vec<InterviewRecord>, job_id: i64) -> Vec<InterviewRecord> {
    interviews.retain(|r| r.job_id == job_id);
    interviews.sort_by(|a, b| b.id.cmp(&a.id));
    interviews.dedup_by_key(|r| r.id);
    interviews
}

