use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use ledgerlens::application::ports::{AnalyzerError, DocumentAnalyzer, JobRepository};
use ledgerlens::application::services::AnalysisWorker;
use ledgerlens::infrastructure::observability::{TracingConfig, init_tracing};
use ledgerlens::infrastructure::persistence::InMemoryJobStore;
use ledgerlens::presentation::{AppState, Settings, create_router};

/// Stand-in analysis engine used until a real document-understanding backend
/// is wired in. Mirrors the "engine not configured" outcome of the worker.
struct StubAnalyzer;

#[async_trait::async_trait]
impl DocumentAnalyzer for StubAnalyzer {
    async fn analyze(&self, _data: &[u8], filename: &str) -> Result<serde_json::Value, AnalyzerError> {
        Ok(serde_json::json!({
            "message": "Analysis engine not configured",
            "filename": filename,
            "raw_data": null,
        }))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(TracingConfig::default());

    let settings = Settings::from_env();

    let job_repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobStore::new());
    let analyzer = Arc::new(StubAnalyzer);

    let (analysis_sender, analysis_receiver) = mpsc::channel(settings.worker.queue_capacity);
    let worker = AnalysisWorker::new(Arc::clone(&job_repository), analyzer);
    tokio::spawn(worker.run(analysis_receiver));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;

    let state = AppState {
        job_repository,
        analysis_sender,
        settings,
    };
    let router = create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
