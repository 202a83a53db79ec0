//! Scoring passes over a job's interview records.
//!
//! [`ScoreOrchestrator::run`] fetches the job, selects its interviews, scores
//! the ones still unscored and writes each score back through a paced
//! read-modify-write cycle.

mod candidates;
mod error;
mod runner;
mod types;


pub use candidates::CandidateDirectory;
pub use error::OrchestratorError;
pub use runner::ScoreOrchestrator;
pub use types::{RecordOutcome, RecordReport, RunReport, format_summary};
