//! Test fixtures for integration tests.

use std::path::{Path, PathBuf};

use serde_json::{Value, json};

pub const JOB_ID: i64 = 1;

pub const JOB_ROLE: &str = "Machine Learning Engineer";

pub const JOB_TEXT: &str = "machine learning engineer building models in python";

pub const ML_SUMMARY: &str = "I build ML models.\\Strong python skills.";

pub const OFF_TOPIC_SUMMARY: &str = "enjoys cooking and gardening";

/// Word vectors covering the fixture vocabulary, in word2vec text layout.
pub const VECTORS_TXT: &str = "\
9 4
machine 0.9 0.1 0.0 0.0
learning 0.8 0.2 0.0 0.1
engineer 0.5 0.5 0.0 0.0
building 0.1 0.9 0.0 0.0
build 0.0 1.0 0.0 0.0
models 0.7 0.0 0.3 0.0
ml 0.9 0.1 0.0 0.0
python 0.2 0.1 0.9 0.0
cooking 0.0 0.0 0.0 1.0
";

/// Writes [`VECTORS_TXT`] to `dir/name` and returns the path.
pub fn write_vectors(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, VECTORS_TXT).expect("write vector file");
    path
}

/// Interview document as the store returns it.
#[derive(Debug, Clone)]
pub struct InterviewBuilder {
    id: i64,
    job_id: i64,
    candidate_id: i64,
    summary: String,
    similarity_score: Value,
    extra: Vec<(String, Value)>,
}

impl InterviewBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            job_id: JOB_ID,
            candidate_id: 100,
            summary: ML_SUMMARY.to_string(),
            similarity_score: Value::Null,
            extra: Vec::new(),
        }
    }

    pub fn job(mut self, job_id: i64) -> Self {
        self.job_id = job_id;
        self
    }

    pub fn candidate(mut self, candidate_id: i64) -> Self {
        self.candidate_id = candidate_id;
        self
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = summary.to_string();
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.similarity_score = json!(score);
        self
    }

    pub fn field(mut self, name: &str, value: Value) -> Self {
        self.extra.push((name.to_string(), value));
        self
    }

    pub fn build(self) -> Value {
        let mut doc = json!({
            "id": self.id,
            "job_desc_id": self.job_id,
            "candidate_id": self.candidate_id,
            "summary": self.summary,
            "similarity_score": self.similarity_score,
            "interview_score": 8,
        });
        for (name, value) in self.extra {
            doc[name] = value;
        }
        doc
    }
}
