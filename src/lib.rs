//! Ranker library crate (used by the binary and integration tests).
//!
//! Scores interview summaries against job descriptions with a pre-trained
//! word-vector model and writes the scores back to a remote record store.
//!
//! ## Pipeline
//! - [`VectorSpace`] - immutable word vectors, loaded once
//! - [`Vectorizer`] - frequency-weighted mean of a text's known token vectors
//! - [`SimilarityScorer`] - cosine similarity between two texts
//! - [`ScoreOrchestrator`] - paced scoring passes over a job's interviews
//!
//! ## Store
//! - [`RecordStore`], [`HttpRecordStore`] - REST access to interviews, jobs and candidates
//!
//! ## Test/Mock Support
//! [`MockRecordStore`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod limiter;
pub mod orchestrator;
pub mod scoring;
pub mod store;

pub use config::{Config, ConfigError};
pub use embedding::{
    Embedding, VectorFormat, VectorSpace, VectorSpaceConfig, VectorSpaceError, Vectorizer,
    tokenize,
};
pub use limiter::{Pacing, RateLimiter, RatePolicy};
pub use orchestrator::{
    CandidateDirectory, OrchestratorError, RecordOutcome, RecordReport, RunReport,
    ScoreOrchestrator, format_summary,
};
pub use scoring::{SimilarityScorer, cosine_similarity};
#[cfg(any(test, feature = "mock"))]
pub use store::{MockCall, MockRecordStore};
pub use store::{
    CandidateInfo, HttpRecordStore, InterviewRecord, JobDescription, RecordStore, ScoreState,
    StoreError, StoreResult,
};
