//! `HttpRecordStore` against an in-process fake of the REST API.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::fixtures::{InterviewBuilder, JOB_ID, JOB_ROLE, JOB_TEXT, write_vectors};
use common::harness::{FakeApi, spawn_api};
use ranker::embedding::{VectorSpace, VectorSpaceConfig, Vectorizer};
use ranker::limiter::Pacing;
use ranker::orchestrator::{RecordOutcome, ScoreOrchestrator};
use ranker::scoring::SimilarityScorer;
use ranker::store::{HttpRecordStore, RecordStore, StoreError};
use serde_json::{Value, json};

fn seeded_api() -> FakeApi {
    let api = FakeApi::new();
    api.insert_job(JOB_ID, JOB_ROLE, JOB_TEXT);
    api.insert_job(2, "Chef", "cooking");
    api.insert_candidate(100, "Ada Lovelace", "ada@example.com");
    api
}

fn client(url: &str) -> HttpRecordStore {
    HttpRecordStore::new(url, Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn test_reads_jobs_interviews_and_candidates() {
    let api = seeded_api();
    api.insert_interview(InterviewBuilder::new(7).score(0.42).build());
    let server = spawn_api(api).await.expect("spawn api");
    let store = client(&server.url());

    let jobs = store.list_jobs().await.expect("list jobs");
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].role_name, JOB_ROLE);

    let job = store.get_job(JOB_ID).await.expect("get job");
    assert_eq!(job.role_text, JOB_TEXT);

    let interviews = store.list_interviews().await.expect("list interviews");
    assert_eq!(interviews.len(), 1);
    assert_eq!(interviews[0].job_id, JOB_ID);
    assert_eq!(interviews[0].similarity_score, Some(0.42));
    assert_eq!(interviews[0].interview_score, Some(8.0));

    let candidate = store.get_candidate(100).await.expect("get candidate");
    assert_eq!(candidate.name, "Ada Lovelace");
}

#[tokio::test]
async fn test_listing_skips_rows_that_do_not_decode() {
    let api = seeded_api();
    api.insert_interview(InterviewBuilder::new(1).build());
    api.insert_interview(
        InterviewBuilder::new(2)
            .job(99)
            .field("candidate_id", Value::Null)
            .build(),
    );
    api.insert_interview(InterviewBuilder::new(3).field("summary", json!(42)).build());
    let server = spawn_api(api).await.expect("spawn api");
    let store = client(&server.url());

    let interviews = store.list_interviews().await.expect("list interviews");

    let ids: Vec<i64> = interviews.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn test_missing_record_is_status_error() {
    let server = spawn_api(seeded_api()).await.expect("spawn api");
    let store = client(&server.url());

    let err = store.get_interview_raw(404).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(matches!(err, StoreError::Status { method: "GET", .. }));
    assert!(err.to_string().contains("/job_interview/404"));
}

#[tokio::test]
async fn test_patch_sends_full_document() {
    let api = seeded_api();
    let doc = InterviewBuilder::new(3)
        .field("notes", json!("keep me"))
        .build();
    api.insert_interview(doc.clone());
    let server = spawn_api(api).await.expect("spawn api");
    let store = client(&server.url());

    let mut record = store.get_interview_raw(3).await.expect("get");
    assert_eq!(record, doc);
    record["similarity_score"] = json!(0.61);
    store.patch_interview_raw(3, &record).await.expect("patch");

    let bodies = server.api.patch_bodies();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0].1, record);
    assert_eq!(server.api.interview(3), Some(record));
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let server = spawn_api(seeded_api()).await.expect("spawn api");
    let store = client(&format!("{}/", server.url()));

    assert_eq!(store.base_url(), server.url());
    assert!(store.get_job(JOB_ID).await.is_ok());
}

#[tokio::test]
async fn test_unreachable_store_is_transport_error() {
    let url = {
        let server = spawn_api(FakeApi::new()).await.expect("spawn api");
        server.url()
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    let store = client(&url);

    let err = store.list_jobs().await.unwrap_err();

    assert!(matches!(err, StoreError::Transport { .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_full_pass_over_http() {
    let dir = tempfile::tempdir().expect("tempdir");
    let space = VectorSpace::load(&VectorSpaceConfig::new(write_vectors(dir.path(), "w2v.txt")))
        .expect("load vectors");
    let scorer = SimilarityScorer::new(Vectorizer::new(Arc::new(space)));

    let api = seeded_api();
    api.insert_interview(InterviewBuilder::new(1).build());
    api.insert_interview(InterviewBuilder::new(2).score(0.73).build());
    api.insert_interview(InterviewBuilder::new(3).field("panel", json!(["x"])).build());
    api.fail_patch(1);
    let server = spawn_api(api).await.expect("spawn api");

    let store: Arc<dyn RecordStore> = Arc::new(client(&server.url()));
    let orchestrator = ScoreOrchestrator::new(store, scorer, Pacing::unlimited());
    let report = orchestrator.run(JOB_ID).await.expect("run");

    let ids: Vec<i64> = report.records.iter().map(|r| r.interview_id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert!(matches!(report.records[0].outcome, RecordOutcome::Persisted { .. }));
    assert!(matches!(report.records[1].outcome, RecordOutcome::Existing { .. }));
    assert!(matches!(
        &report.records[2].outcome,
        RecordOutcome::Failed { error, .. } if error.status() == Some(500)
    ));

    let scored = server.api.interview(3).expect("interview 3");
    assert!(scored["similarity_score"].as_f64().expect("score") > 0.0);
    assert_eq!(scored["panel"], json!(["x"]));
    assert_eq!(server.api.interview(2).expect("interview 2")["similarity_score"], json!(0.73));
    assert_eq!(server.api.interview(1).expect("interview 1")["similarity_score"], Value::Null);
}
