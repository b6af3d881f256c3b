use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::ports::{DocumentAnalyzer, JobRepository};
use crate::domain::{JobId, JobTransition};

/// One queued unit of work for the analysis worker.
pub struct AnalysisRequest {
    pub job_id: JobId,
    pub filename: String,
    pub data: Vec<u8>,
}

/// Background processor: drains the analysis channel and drives each job
/// from PENDING through PROCESSING to a terminal state.
///
/// An analysis failure marks that one job FAILED and never stops the loop.
pub struct AnalysisWorker {
    repository: Arc<dyn JobRepository>,
    analyzer: Arc<dyn DocumentAnalyzer>,
}

impl AnalysisWorker {
    pub fn new(repository: Arc<dyn JobRepository>, analyzer: Arc<dyn DocumentAnalyzer>) -> Self {
        Self {
            repository,
            analyzer,
        }
    }

    pub async fn run(self, mut receiver: mpsc::Receiver<AnalysisRequest>) {
        tracing::info!("Analysis worker started");
        while let Some(request) = receiver.recv().await {
            self.process(request).await;
        }
        tracing::info!("Analysis channel closed, worker stopping");
    }

    /// Processes a single request end to end. Split out from `run` so tests
    /// can drive the worker without a channel.
    pub async fn process(&self, request: AnalysisRequest) {
        let job_id = request.job_id;
        tracing::info!(job_id = %job_id, filename = %request.filename, "Processing job");

        if let Err(e) = self
            .repository
            .update(job_id, JobTransition::Processing)
            .await
        {
            tracing::error!(job_id = %job_id, error = %e, "Failed to mark job as processing");
            return;
        }

        let outcome = match self
            .analyzer
            .analyze(&request.data, &request.filename)
            .await
        {
            Ok(result) => JobTransition::Completed(result),
            Err(e) => {
                tracing::warn!(job_id = %job_id, error = %e, "Document analysis failed");
                JobTransition::Failed(e.to_string())
            }
        };

        let status = outcome.target_status();
        match self.repository.update(job_id, outcome).await {
            Ok(_) => tracing::info!(job_id = %job_id, status = %status, "Job reached terminal state"),
            Err(e) => {
                tracing::error!(job_id = %job_id, error = %e, "Failed to record job outcome")
            }
        }
    }
}
