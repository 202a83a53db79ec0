use tracing::debug;

use crate::embedding::{Embedding, Vectorizer};

use super::similarity::cosine_similarity;

/// Scores interview summaries against job descriptions.
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    vectorizer: Vectorizer,
}

impl SimilarityScorer {
    pub fn new(vectorizer: Vectorizer) -> Self {
        Self { vectorizer }
    }

    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }

    /// Cosine similarity of two embeddings. Symmetric; `0.0` for a zero vector.
    pub fn score(&self, a: &Embedding, b: &Embedding) -> f64 {
        cosine_similarity(a.as_slice(), b.as_slice())
    }

    /// Vectorizes both texts and returns their similarity.
    pub fn predict(&self, summary: &str, job_text: &str) -> f64 {
        let job = self.vectorizer.vectorize(job_text);
        let candidate = self.vectorizer.vectorize(summary);

        if job.is_zero() || candidate.is_zero() {
            debug!(
                job_signal = !job.is_zero(),
                summary_signal = !candidate.is_zero(),
                "No in-vocabulary tokens on one side; similarity is zero"
            );
        }

        self.score(&job, &candidate)
    }
}
