//! Similarity scoring between a job description and an interview summary.
//!
//! [`cosine_similarity`] compares two embeddings; [`SimilarityScorer`] wraps a
//! [`Vectorizer`](crate::embedding::Vectorizer) so callers can score raw text.
//!
//! A zero-norm embedding (text with no in-vocabulary tokens) scores `0.0`
//! against anything. That value is a valid score, but it coincides with the
//! store's "unset" sentinel; see [`crate::store::ScoreState`].

pub mod scorer;
pub mod similarity;


pub use scorer::SimilarityScorer;
pub use similarity::cosine_similarity;
