use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::client::RecordStore;
use super::error::{StoreError, StoreResult};
use super::model::{CandidateInfo, InterviewRecord, JobDescription, decode_interview_rows};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// A call received by [`MockRecordStore`], in arrival order.
pub enum MockCall {
    ListJobs,
    GetJob(i64),
    ListInterviews,
    GetInterview(i64),
    PatchInterview(i64),
    GetCandidate(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Route {
    ListJobs,
    GetJob,
    ListInterviews,
    GetInterview,
    PatchInterview,
    GetCandidate,
}

#[derive(Default)]
struct MockState {
    jobs: BTreeMap<i64, Value>,
    interviews: BTreeMap<i64, Value>,
    candidates: BTreeMap<i64, Value>,
    failures: HashMap<(Route, Option<i64>), u16>,
    calls: Vec<MockCall>,
}

/// In-memory record store with per-route failure injection.
///
/// Documents are kept as raw JSON so tests can check that writes preserve
/// fields the orchestrator does not know about. A `PATCH` replaces the whole
/// stored document, like the real store does when handed a full record.
#[derive(Default)]
pub struct MockRecordStore {
    state: Mutex<MockState>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_job(&self, id: i64, role_name: &str, role_text: &str) {
        self.state.lock().jobs.insert(
            id,
            json!({ "id": id, "role_name": role_name, "role_description": role_text }),
        );
    }

    /// Inserts an interview document. It must carry an integer `id`.
    pub fn insert_interview(&self, document: Value) {
        let id = document
            .get("id")
            .and_then(Value::as_i64)
            .unwrap_or_default();
        self.state.lock().interviews.insert(id, document);
    }

    pub fn insert_candidate(&self, id: i64, name: &str, email: &str) {
        self.state
            .lock()
            .candidates
            .insert(id, json!({ "id": id, "name": name, "email": email }));
    }

    /// Returns the stored interview document.
    pub fn interview(&self, id: i64) -> Option<Value> {
        self.state.lock().interviews.get(&id).cloned()
    }

    /// Mutates a stored interview field without going through the store API.
    pub fn set_interview_field(&self, id: i64, field: &str, value: Value) {
        if let Some(Value::Object(fields)) = self.state.lock().interviews.get_mut(&id) {
            fields.insert(field.to_string(), value);
        }
    }

    pub fn fail_list_jobs(&self, status: u16) {
        self.fail(Route::ListJobs, None, status);
    }

    pub fn fail_get_job(&self, id: i64, status: u16) {
        self.fail(Route::GetJob, Some(id), status);
    }

    pub fn fail_list_interviews(&self, status: u16) {
        self.fail(Route::ListInterviews, None, status);
    }

    pub fn fail_get_interview(&self, id: i64, status: u16) {
        self.fail(Route::GetInterview, Some(id), status);
    }

    pub fn fail_patch_interview(&self, id: i64, status: u16) {
        self.fail(Route::PatchInterview, Some(id), status);
    }

    pub fn fail_get_candidate(&self, id: i64, status: u16) {
        self.fail(Route::GetCandidate, Some(id), status);
    }

    /// Removes every injected failure.
    pub fn clear_failures(&self) {
        self.state.lock().failures.clear();
    }

    /// Returns every call received so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().calls.clone()
    }

    /// Number of `PATCH /job_interview/{id}` calls received (successful or not).
    pub fn patch_count(&self) -> usize {
        self.count(|c| matches!(c, MockCall::PatchInterview(_)))
    }

    /// Number of `GET /candidate/{id}` calls received.
    pub fn candidate_lookups(&self) -> usize {
        self.count(|c| matches!(c, MockCall::GetCandidate(_)))
    }

    pub fn reset_calls(&self) {
        self.state.lock().calls.clear();
    }

    fn count(&self, pred: impl Fn(&MockCall) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|c| pred(c)).count()
    }

    fn fail(&self, route: Route, id: Option<i64>, status: u16) {
        self.state.lock().failures.insert((route, id), status);
    }

    fn check(
        state: &MockState,
        route: Route,
        id: Option<i64>,
        method: &'static str,
        path: &str,
    ) -> StoreResult<()> {
        match state.failures.get(&(route, id)) {
            Some(&status) => Err(StoreError::Status {
                method,
                path: path.to_string(),
                status,
                body: "injected failure".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn not_found(method: &'static str, path: String) -> StoreError {
        StoreError::Status {
            method,
            path,
            status: 404,
            body: "not found".to_string(),
        }
    }

    fn decode<T: DeserializeOwned>(path: &str, value: Value) -> StoreResult<T> {
        serde_json::from_value(value).map_err(|e| StoreError::Decode {
            method: "GET",
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn list_jobs(&self) -> StoreResult<Vec<JobDescription>> {
        let path = "/job_desc";
        let mut state = self.state.lock();
        state.calls.push(MockCall::ListJobs);
        Self::check(&state, Route::ListJobs, None, "GET", path)?;

        let jobs: Vec<Value> = state.jobs.values().cloned().collect();
        Self::decode(path, Value::Array(jobs))
    }

    async fn get_job(&self, id: i64) -> StoreResult<JobDescription> {
        let path = format!("/job_desc/{id}");
        let mut state = self.state.lock();
        state.calls.push(MockCall::GetJob(id));
        Self::check(&state, Route::GetJob, Some(id), "GET", &path)?;

        match state.jobs.get(&id).cloned() {
            Some(doc) => Self::decode(&path, doc),
            None => Err(Self::not_found("GET", path)),
        }
    }

    async fn list_interviews(&self) -> StoreResult<Vec<InterviewRecord>> {
        let path = "/job_interview";
        let mut state = self.state.lock();
        state.calls.push(MockCall::ListInterviews);
        Self::check(&state, Route::ListInterviews, None, "GET", path)?;

        let docs: Vec<Value> = state.interviews.values().cloned().collect();
        Ok(decode_interview_rows(docs))
    }

    async fn get_interview_raw(&self, id: i64) -> StoreResult<Value> {
        let path = format!("/job_interview/{id}");
        let mut state = self.state.lock();
        state.calls.push(MockCall::GetInterview(id));
        Self::check(&state, Route::GetInterview, Some(id), "GET", &path)?;

        state
            .interviews
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found("GET", path))
    }

    async fn patch_interview_raw(&self, id: i64, record: &Value) -> StoreResult<()> {
        let path = format!("/job_interview/{id}");
        let mut state = self.state.lock();
        state.calls.push(MockCall::PatchInterview(id));
        Self::check(&state, Route::PatchInterview, Some(id), "PATCH", &path)?;

        match state.interviews.get_mut(&id) {
            Some(doc) => {
                *doc = record.clone();
                Ok(())
            }
            None => Err(Self::not_found("PATCH", path)),
        }
    }

    async fn get_candidate(&self, id: i64) -> StoreResult<CandidateInfo> {
        let path = format!("/candidate/{id}");
        let mut state = self.state.lock();
        state.calls.push(MockCall::GetCandidate(id));
        Self::check(&state, Route::GetCandidate, Some(id), "GET", &path)?;

        match state.candidates.get(&id).cloned() {
            Some(doc) => Self::decode(&path, doc),
            None => Err(Self::not_found("GET", path)),
        }
    }
}
