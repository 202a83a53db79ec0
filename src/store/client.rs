use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::error::{StoreError, StoreResult};
use super::model::{CandidateInfo, InterviewRecord, JobDescription, decode_interview_rows};

#[async_trait]
/// Remote record store consumed by the orchestrator.
///
/// Interview updates go through the raw JSON document: the store has no
/// partial-update call, so a write must send back every field it received.
pub trait RecordStore: Send + Sync {
    /// `GET /job_desc`
    async fn list_jobs(&self) -> StoreResult<Vec<JobDescription>>;
    /// `GET /job_desc/{id}`
    async fn get_job(&self, id: i64) -> StoreResult<JobDescription>;
    /// `GET /job_interview`. Rows that do not decode are skipped.
    async fn list_interviews(&self) -> StoreResult<Vec<InterviewRecord>>;
    /// `GET /job_interview/{id}`, returned verbatim.
    async fn get_interview_raw(&self, id: i64) -> StoreResult<Value>;
    /// `PATCH /job_interview/{id}` with the full record document.
    async fn patch_interview_raw(&self, id: i64, record: &Value) -> StoreResult<()>;
    /// `GET /candidate/{id}`
    async fn get_candidate(&self, id: i64) -> StoreResult<CandidateInfo>;
}

#[derive(Clone)]
/// [`RecordStore`] over the store's REST API.
pub struct HttpRecordStore {
    http: HttpClient,
    base_url: String,
}

impl std::fmt::Debug for HttpRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRecordStore")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpRecordStore {
    /// Creates a client for `base_url` with a per-request `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> StoreResult<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport {
                method: "INIT",
                path: String::new(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: String) -> StoreResult<T> {
        debug!(path = %path, "GET");
        let resp = self
            .http
            .get(self.url(&path))
            .send()
            .await
            .map_err(|e| StoreError::Transport {
                method: "GET",
                path: path.clone(),
                message: e.to_string(),
            })?;

        let resp = ensure_ok("GET", &path, resp).await?;

        resp.json::<T>().await.map_err(|e| StoreError::Decode {
            method: "GET",
            path,
            message: e.to_string(),
        })
    }
}

async fn ensure_ok(
    method: &'static str,
    path: &str,
    resp: reqwest::Response,
) -> StoreResult<reqwest::Response> {
    if resp.status() == StatusCode::OK {
        return Ok(resp);
    }

    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::Status {
        method,
        path: path.to_string(),
        status,
        body,
    })
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list_jobs(&self) -> StoreResult<Vec<JobDescription>> {
        self.get_json("/job_desc".to_string()).await
    }

    async fn get_job(&self, id: i64) -> StoreResult<JobDescription> {
        self.get_json(format!("/job_desc/{id}")).await
    }

    async fn list_interviews(&self) -> StoreResult<Vec<InterviewRecord>> {
        let rows: Vec<Value> = self.get_json("/job_interview".to_string()).await?;
        Ok(decode_interview_rows(rows))
    }

    async fn get_interview_raw(&self, id: i64) -> StoreResult<Value> {
        self.get_json(format!("/job_interview/{id}")).await
    }

    async fn patch_interview_raw(&self, id: i64, record: &Value) -> StoreResult<()> {
        let path = format!("/job_interview/{id}");
        debug!(path = %path, "PATCH");

        let resp = self
            .http
            .patch(self.url(&path))
            .json(record)
            .send()
            .await
            .map_err(|e| StoreError::Transport {
                method: "PATCH",
                path: path.clone(),
                message: e.to_string(),
            })?;

        ensure_ok("PATCH", &path, resp).await.map(|_| ())
    }

    async fn get_candidate(&self, id: i64) -> StoreResult<CandidateInfo> {
        self.get_json(format!("/candidate/{id}")).await
    }
}
