use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{JobRepository, StatusQuery, StatusQueryError};
use crate::domain::{Job, JobId};

/// `StatusQuery` backed directly by the store, for a tracker embedded in the
/// same process as the server.
pub struct InProcessStatusClient {
    repository: Arc<dyn JobRepository>,
}

impl InProcessStatusClient {
    pub fn new(repository: Arc<dyn JobRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl StatusQuery for InProcessStatusClient {
    async fn get_job(&self, id: JobId) -> Result<Job, StatusQueryError> {
        self.repository
            .get_by_id(id)
            .await
            .map_err(|e| StatusQueryError::Transport(e.to_string()))?
            .ok_or(StatusQueryError::NotFound(id))
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, StatusQueryError> {
        self.repository
            .list()
            .await
            .map_err(|e| StatusQueryError::Transport(e.to_string()))
    }
}
