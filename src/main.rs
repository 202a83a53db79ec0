//! Ranker entrypoint: one scoring pass, or a job listing.

use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;

use ranker::config::Config;
use ranker::embedding::{VectorSpace, Vectorizer};
use ranker::limiter::Pacing;
use ranker::orchestrator::{RecordOutcome, RunReport, ScoreOrchestrator, format_summary};
use ranker::scoring::SimilarityScorer;
use ranker::store::{HttpRecordStore, RecordStore};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config = Config::from_env()?;
    if let Some(arg) = std::env::args().skip(1).find(|a| !a.starts_with("--")) {
        config.job_id = Some(arg.parse()?);
    }
    config.validate()?;

    tracing::info!(
        api_base_url = %config.api_base_url,
        model_path = %config.model_path.display(),
        job_id = ?config.job_id,
        "Ranker starting"
    );

    let space = Arc::new(VectorSpace::load(&config.vector_space())?);
    tracing::info!(
        model = space.name(),
        vocab = space.len(),
        dim = space.dim(),
        "Word vectors loaded"
    );

    let store: Arc<dyn RecordStore> =
        Arc::new(HttpRecordStore::new(&config.api_base_url, config.http_timeout)?);

    let Some(job_id) = config.job_id else {
        let jobs = store.list_jobs().await?;
        println!("Available jobs:");
        for job in jobs {
            println!("  {:>4}  {}", job.id, job.role_name);
        }
        return Ok(());
    };

    let scorer = SimilarityScorer::new(Vectorizer::new(space));
    let pacing = Pacing::new(config.write_interval, config.record_interval);
    let orchestrator = ScoreOrchestrator::new(store, scorer, pacing);

    let report = orchestrator.run(job_id).await?;
    print_report(&report);

    Ok(())
}

fn print_report(report: &RunReport) {
    println!("Job {}: {}", report.job.id, report.job.role_name);
    for record in &report.records {
        let tag = match &record.outcome {
            RecordOutcome::Existing { .. } => "existing",
            RecordOutcome::Persisted { .. } => "saved",
            RecordOutcome::Failed { .. } => "NOT SAVED",
        };
        let interview_score = record
            .interview_score
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!();
        println!(
            "#{} {} <{}>  similarity {:.4} ({})  interview score {}",
            record.interview_id,
            record.candidate.name,
            record.candidate.email,
            record.score(),
            tag,
            interview_score,
        );
        println!("{}", format_summary(&record.summary));
    }
    println!();
    println!(
        "{} records: {} saved, {} existing, {} failed",
        report.len(),
        report.persisted(),
        report.skipped(),
        report.failed()
    );
}

async fn run_health_check() -> i32 {
    let Ok(base_url) = std::env::var("RANKER_API_BASE_URL") else {
        return 1;
    };
    let url = format!("{}/job_desc", base_url.trim_end_matches('/'));

    let Ok(client) = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
    else {
        return 1;
    };

    match client.get(&url).send().await {
        Ok(res) if res.status() == reqwest::StatusCode::OK => 0,
        _ => 1,
    }
}
