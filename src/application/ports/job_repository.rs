use async_trait::async_trait;

use crate::domain::{Job, JobId, JobTransition};

use super::RepositoryError;

/// Authoritative job store.
///
/// `create_batch` is all-or-nothing and read-after-write: every job it
/// accepts is immediately visible to `get_by_id`/`list`, because status
/// polling starts right after ingestion returns.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Creates every job in the batch or none of them. Batches preserve
    /// submission order.
    async fn create_batch(&self, jobs: &[Job]) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError>;

    /// Snapshot of all jobs, newest first.
    async fn list(&self) -> Result<Vec<Job>, RepositoryError>;

    /// Applies a forward transition and returns the updated job. Refused
    /// transitions (terminal or backward) surface as `InvalidTransition`.
    async fn update(&self, id: JobId, transition: JobTransition) -> Result<Job, RepositoryError>;
}
