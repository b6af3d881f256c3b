use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("analysis failed: {0}")]
    AnalysisFailed(String),
    #[error("engine unavailable: {0}")]
    Unavailable(String),
}

/// Opaque document-understanding engine driven by the analysis worker.
///
/// The payload it returns is stored verbatim on the job; nothing in this
/// crate interprets it.
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    async fn analyze(&self, data: &[u8], filename: &str) -> Result<Value, AnalyzerError>;
}
