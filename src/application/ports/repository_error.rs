use crate::domain::TransitionError;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("job not found: {0}")]
    NotFound(String),
    #[error("duplicate job id: {0}")]
    DuplicateId(String),
    #[error("empty batch")]
    EmptyBatch,
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),
    #[error("storage failed: {0}")]
    StorageFailed(String),
}
