//! In-process fake of the record store REST API.

use std::collections::{BTreeMap, HashSet};
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

#[derive(Default)]
pub struct FakeState {
    pub jobs: BTreeMap<i64, Value>,
    pub interviews: BTreeMap<i64, Value>,
    pub candidates: BTreeMap<i64, Value>,
    pub patch_bodies: Vec<(i64, Value)>,
    pub failing_patches: HashSet<i64>,
}

#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_job(&self, id: i64, role_name: &str, role_text: &str) {
        self.state.lock().jobs.insert(
            id,
            json!({ "id": id, "role_name": role_name, "role_description": role_text }),
        );
    }

    pub fn insert_interview(&self, doc: Value) {
        let id = doc["id"].as_i64().expect("interview id");
        self.state.lock().interviews.insert(id, doc);
    }

    pub fn insert_candidate(&self, id: i64, name: &str, email: &str) {
        self.state
            .lock()
            .candidates
            .insert(id, json!({ "id": id, "name": name, "email": email }));
    }

    pub fn fail_patch(&self, id: i64) {
        self.state.lock().failing_patches.insert(id);
    }

    pub fn interview(&self, id: i64) -> Option<Value> {
        self.state.lock().interviews.get(&id).cloned()
    }

    pub fn patch_bodies(&self) -> Vec<(i64, Value)> {
        self.state.lock().patch_bodies.clone()
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/job_desc", get(list_jobs))
            .route("/job_desc/{id}", get(get_job))
            .route("/job_interview", get(list_interviews))
            .route(
                "/job_interview/{id}",
                get(get_interview).patch(patch_interview),
            )
            .route("/candidate/{id}", get(get_candidate))
            .with_state(self.clone())
    }
}

async fn list_jobs(State(api): State<FakeApi>) -> Json<Vec<Value>> {
    Json(api.state.lock().jobs.values().cloned().collect())
}

async fn get_job(
    State(api): State<FakeApi>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    api.state
        .lock()
        .jobs
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_interviews(State(api): State<FakeApi>) -> Json<Vec<Value>> {
    Json(api.state.lock().interviews.values().cloned().collect())
}

async fn get_interview(
    State(api): State<FakeApi>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    api.state
        .lock()
        .interviews
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn patch_interview(
    State(api): State<FakeApi>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut state = api.state.lock();
    state.patch_bodies.push((id, body.clone()));

    if state.failing_patches.contains(&id) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    match state.interviews.get_mut(&id) {
        Some(doc) => {
            *doc = body.clone();
            Ok(Json(body))
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}

async fn get_candidate(
    State(api): State<FakeApi>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    api.state
        .lock()
        .candidates
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub struct TestApiServer {
    pub addr: SocketAddr,
    pub api: FakeApi,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestApiServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestApiServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Serves `api` on an ephemeral localhost port.
pub async fn spawn_api(api: FakeApi) -> std::io::Result<TestApiServer> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = api.router();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let server_handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    Ok(TestApiServer {
        addr,
        api,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
