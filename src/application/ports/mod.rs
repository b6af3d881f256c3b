mod document_analyzer;
mod job_repository;
mod repository_error;
mod status_query;

pub use document_analyzer::{AnalyzerError, DocumentAnalyzer};
pub use job_repository::JobRepository;
pub use repository_error::RepositoryError;
pub use status_query::{StatusQuery, StatusQueryError};
