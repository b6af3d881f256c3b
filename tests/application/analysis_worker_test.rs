use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::mpsc;

use ledgerlens::application::ports::{
    AnalyzerError, DocumentAnalyzer, JobRepository,
};
use ledgerlens::application::services::{AnalysisRequest, AnalysisWorker};
use ledgerlens::domain::{Job, JobStatus};
use ledgerlens::infrastructure::persistence::InMemoryJobStore;

struct FixedResultAnalyzer;

#[async_trait::async_trait]
impl DocumentAnalyzer for FixedResultAnalyzer {
    async fn analyze(&self, _data: &[u8], _filename: &str) -> Result<serde_json::Value, AnalyzerError> {
        Ok(json!({"amount": 100}))
    }
}

struct FailingAnalyzer;

#[async_trait::async_trait]
impl DocumentAnalyzer for FailingAnalyzer {
    async fn analyze(&self, _data: &[u8], _filename: &str) -> Result<serde_json::Value, AnalyzerError> {
        Err(AnalyzerError::AnalysisFailed("unreadable scan".to_string()))
    }
}

async fn seeded_store() -> (Arc<InMemoryJobStore>, Job) {
    let store = Arc::new(InMemoryJobStore::new());
    let job = Job::new("a.pdf".to_string(), None, None);
    store.create_batch(&[job.clone()]).await.unwrap();
    (store, job)
}

fn request_for(job: &Job) -> AnalysisRequest {
    AnalysisRequest {
        job_id: job.id,
        filename: job.filename.clone(),
        data: b"%PDF-1.4".to_vec(),
    }
}

#[tokio::test]
async fn given_successful_analysis_when_processing_then_job_completes_with_result() {
    let (store, job) = seeded_store().await;
    let worker = AnalysisWorker::new(store.clone(), Arc::new(FixedResultAnalyzer));

    worker.process(request_for(&job)).await;

    let stored = store.get_by_id(job.id).await.unwrap().unwrap();
    assert_eq!(stored.status, JobStatus::Completed);
    assert_eq!(stored.result, Some(json!({"amount": 100})));
    assert!(stored.error.is_none());
}

#[tokio::test]
async fn given_failing_analysis_when_processing_then_job_fails_with_error() {
    let (store, job) = seeded_store().await;
    let worker = AnalysisWorker::new(store.clone(), Arc::new(FailingAnalyzer));

    worker.process(request_for(&job)).await;

    let stored = store.get_by_id(job.id).await.unwrap().unwrap();
    assert_eq!(stored.status, JobStatus::Failed);
    assert!(
        stored
            .error
            .as_deref()
            .is_some_and(|e| e.contains("unreadable scan"))
    );
    assert!(stored.result.is_none());
}

#[tokio::test]
async fn given_unknown_job_when_processing_then_worker_survives() {
    let store = Arc::new(InMemoryJobStore::new());
    let worker = AnalysisWorker::new(store.clone(), Arc::new(FixedResultAnalyzer));
    let orphan = Job::new("ghost.pdf".to_string(), None, None);

    worker.process(request_for(&orphan)).await;

    assert!(store.get_by_id(orphan.id).await.unwrap().is_none());
}

#[tokio::test]
async fn given_queued_requests_when_running_then_jobs_reach_terminal_state() {
    let store = Arc::new(InMemoryJobStore::new());
    let jobs = vec![
        Job::new("a.pdf".to_string(), None, None),
        Job::new("b.pdf".to_string(), None, None),
    ];
    store.create_batch(&jobs).await.unwrap();

    let worker = AnalysisWorker::new(store.clone(), Arc::new(FixedResultAnalyzer));
    let (sender, receiver) = mpsc::channel(8);
    let handle = tokio::spawn(worker.run(receiver));

    for job in &jobs {
        sender.send(request_for(job)).await.unwrap();
    }
    drop(sender);
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("worker drains queue")
        .unwrap();

    for job in &jobs {
        let stored = store.get_by_id(job.id).await.unwrap().unwrap();
        assert_eq!(stored.status, JobStatus::Completed);
    }
}
