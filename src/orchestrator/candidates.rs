use std::collections::HashMap;

use tracing::warn;

use crate::store::{CandidateInfo, RecordStore};

/// Candidate details cached for the duration of one pass.
///
/// Each candidate id is looked up at most once. A failed lookup is cached as
/// [`CandidateInfo::unknown`] so it is not retried until the next pass.
#[derive(Debug, Default)]
pub struct CandidateDirectory {
    entries: HashMap<i64, CandidateInfo>,
}

impl CandidateDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached details for `id`, fetching them on first use.
    pub async fn resolve(&mut self, store: &dyn RecordStore, id: i64) -> CandidateInfo {
        if let Some(info) = self.entries.get(&id) {
            return info.clone();
        }

        let info = match store.get_candidate(id).await {
            Ok(mut info) => {
                info.id = id;
                info
            }
            Err(e) => {
                warn!(candidate_id = id, error = %e, "Candidate lookup failed; using placeholder");
                CandidateInfo::unknown(id)
            }
        };

        self.entries.insert(id, info.clone());
        info
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
