use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{Job, JobId, JobTransition};

#[derive(Default)]
struct StoreInner {
    jobs: HashMap<JobId, Job>,
    // Creation order; `list` walks it newest first.
    order: Vec<JobId>,
}

/// Authoritative in-memory job store.
///
/// Mutation goes through the domain state machine, so monotonicity holds for
/// every caller. No await happens under the lock, so reads are always
/// consistent with the latest completed write.
#[derive(Default)]
pub struct InMemoryJobStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobRepository for InMemoryJobStore {
    async fn create_batch(&self, jobs: &[Job]) -> Result<(), RepositoryError> {
        if jobs.is_empty() {
            return Err(RepositoryError::EmptyBatch);
        }

        let mut inner = self
            .inner
            .write()
            .map_err(|e| RepositoryError::StorageFailed(e.to_string()))?;

        // Validate the whole batch before touching the map: all or nothing.
        let mut seen = std::collections::HashSet::new();
        for job in jobs {
            if inner.jobs.contains_key(&job.id) || !seen.insert(job.id) {
                return Err(RepositoryError::DuplicateId(job.id.to_string()));
            }
        }

        for job in jobs {
            inner.order.push(job.id);
            inner.jobs.insert(job.id, job.clone());
        }
        Ok(())
    }

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| RepositoryError::StorageFailed(e.to_string()))?;
        Ok(inner.jobs.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Job>, RepositoryError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| RepositoryError::StorageFailed(e.to_string()))?;
        Ok(inner
            .order
            .iter()
            .rev()
            .filter_map(|id| inner.jobs.get(id).cloned())
            .collect())
    }

    async fn update(&self, id: JobId, transition: JobTransition) -> Result<Job, RepositoryError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| RepositoryError::StorageFailed(e.to_string()))?;
        let job = inner
            .jobs
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        job.apply(transition)?;
        Ok(job.clone())
    }
}
