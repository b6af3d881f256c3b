use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::application::ports::{StatusQuery, StatusQueryError};
use crate::domain::{Job, JobId, JobStatus};

/// Wire form of a job as served by the status endpoints.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobDto {
    id: Uuid,
    filename: String,
    status: JobStatus,
    ledger_name: Option<String>,
    financial_year: Option<String>,
    result: Option<Value>,
    error: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct JobListDto {
    jobs: Vec<JobDto>,
}

impl JobDto {
    fn into_job(self) -> Job {
        let created_at = self.created_at.unwrap_or_else(Utc::now);
        Job {
            id: JobId::from_uuid(self.id),
            filename: self.filename,
            status: self.status,
            ledger_name: self.ledger_name,
            financial_year: self.financial_year,
            result: self.result,
            error: self.error,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        }
    }
}

/// `StatusQuery` over the HTTP API, for a tracker running outside the
/// server process.
pub struct HttpStatusClient {
    client: Client,
    base_url: String,
}

impl HttpStatusClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl StatusQuery for HttpStatusClient {
    async fn get_job(&self, id: JobId) -> Result<Job, StatusQueryError> {
        let url = format!("{}/api/v1/documents/jobs/{}", self.base_url, id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StatusQueryError::Transport(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StatusQueryError::NotFound(id));
        }
        if !response.status().is_success() {
            return Err(StatusQueryError::Transport(format!(
                "unexpected status {} from {}",
                response.status(),
                url
            )));
        }

        let dto: JobDto = response
            .json()
            .await
            .map_err(|e| StatusQueryError::MalformedResponse(e.to_string()))?;
        Ok(dto.into_job())
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, StatusQueryError> {
        let url = format!("{}/api/v1/documents/jobs", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StatusQueryError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StatusQueryError::Transport(format!(
                "unexpected status {} from {}",
                response.status(),
                url
            )));
        }

        let dto: JobListDto = response
            .json()
            .await
            .map_err(|e| StatusQueryError::MalformedResponse(e.to_string()))?;
        Ok(dto.jobs.into_iter().map(JobDto::into_job).collect())
    }
}
