use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use super::space::VectorSpace;
use super::tokenize::tokenize;

/// Fixed-dimension vector derived from a piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    /// All-zero embedding ("no signal").
    pub fn zeros(dim: usize) -> Self {
        Self(vec![0.0; dim])
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Returns `true` if every component is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&x| x == 0.0)
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

impl AsRef<[f32]> for Embedding {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

/// Turns text into a frequency-weighted mean of its known token vectors.
#[derive(Debug, Clone)]
pub struct Vectorizer {
    space: Arc<VectorSpace>,
}

impl Vectorizer {
    pub fn new(space: Arc<VectorSpace>) -> Self {
        Self { space }
    }

    pub fn dim(&self) -> usize {
        self.space.dim()
    }

    /// Averages the frequency-scaled vectors `v_t * f_t` of every
    /// in-vocabulary token occurrence, each weighted by `f_t`, where `f_t` is
    /// the token's count in `text`.
    ///
    /// Summed per distinct token this is `sum(v_t * f_t^3) / sum(f_t^2)`, so
    /// repeated words dominate the result more than their raw share.
    /// Returns the zero vector when no token is in the vocabulary.
    pub fn vectorize(&self, text: &str) -> Embedding {
        let tokens = tokenize(text);

        let mut frequencies: BTreeMap<&str, u32> = BTreeMap::new();
        for token in &tokens {
            *frequencies.entry(token.as_str()).or_insert(0) += 1;
        }

        let dim = self.space.dim();
        let mut sum = vec![0.0f64; dim];
        let mut total_weight = 0.0f64;
        let mut known = 0usize;

        for (token, &freq) in &frequencies {
            let Some(vector) = self.space.get(token) else {
                continue;
            };
            let f = f64::from(freq);
            let weight = f * f * f;
            for (acc, &component) in sum.iter_mut().zip(vector) {
                *acc += f64::from(component) * weight;
            }
            total_weight += f * f;
            known += 1;
        }

        debug!(
            token_count = tokens.len(),
            distinct = frequencies.len(),
            known,
            "Vectorized text"
        );

        if known == 0 {
            return Embedding::zeros(dim);
        }

        Embedding(
            sum.into_iter()
                .map(|acc| (acc / total_weight) as f32)
                .collect(),
        )
    }
}
