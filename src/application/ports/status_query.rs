use async_trait::async_trait;

use crate::domain::{Job, JobId};

#[derive(Debug, thiserror::Error)]
pub enum StatusQueryError {
    #[error("transport: {0}")]
    Transport(String),
    #[error("job not found: {0}")]
    NotFound(JobId),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Read side of the job store as seen by a polling client.
///
/// Implementations must be side-effect free and reflect the store's state at
/// call time.
#[async_trait]
pub trait StatusQuery: Send + Sync {
    async fn get_job(&self, id: JobId) -> Result<Job, StatusQueryError>;

    async fn list_jobs(&self) -> Result<Vec<Job>, StatusQueryError>;
}
