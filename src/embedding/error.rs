use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VectorSpaceError {
    #[error("vector space artifact not found at path: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read vector space artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt vector space artifact {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("vector space {path} declares {declared} words but contains {actual}")]
    VocabularyCount {
        path: PathBuf,
        declared: usize,
        actual: usize,
    },

    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid vector space: {reason}")]
    Invalid { reason: String },
}

impl VectorSpaceError {
    pub(crate) fn corrupt(path: &std::path::Path, reason: impl Into<String>) -> Self {
        VectorSpaceError::Corrupt {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}
