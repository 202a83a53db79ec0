//! External record store: interviews, jobs and candidates.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;


pub use client::{HttpRecordStore, RecordStore};
pub use error::{StoreError, StoreResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockCall, MockRecordStore};
pub use model::{
    CandidateInfo, InterviewRecord, JobDescription, ScoreState, apply_similarity_score,
    decode_interview_rows,
};
