//! Cross-cutting, shared constants.
//!
//! Pacing defaults mirror the external record store's rate limit: one write
//! cycle every two seconds and one record every second.

/// Minimum spacing between read-modify-write cycles against the record store.
pub const DEFAULT_WRITE_INTERVAL_MS: u64 = 2_000;

/// Minimum spacing between two records of one orchestration pass.
pub const DEFAULT_RECORD_INTERVAL_MS: u64 = 1_000;

/// Request timeout for the HTTP record store.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Wire field holding the persisted similarity score.
pub const SIMILARITY_SCORE_FIELD: &str = "similarity_score";

/// Fallback display name when a candidate lookup fails.
pub const UNKNOWN_CANDIDATE_NAME: &str = "Unknown Candidate";

/// Fallback display email when a candidate lookup fails.
pub const UNKNOWN_CANDIDATE_EMAIL: &str = "Unknown Email";
