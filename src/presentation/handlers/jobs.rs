use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{Job, JobId, JobStatus};
use crate::presentation::state::AppState;

const DEFAULT_LIST_LIMIT: usize = 50;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: String,
    pub filename: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Job> for JobResponse {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.to_string(),
            filename: job.filename.clone(),
            status: job.status.as_str().to_string(),
            ledger_name: job.ledger_name.clone(),
            financial_year: job.financial_year.clone(),
            result: job.result.clone(),
            error: job.error.clone(),
            created_at: job.created_at.to_rfc3339(),
            updated_at: job.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct JobListResponse {
    pub total: usize,
    pub jobs: Vec<JobResponse>,
}

#[derive(Deserialize)]
pub struct ListJobsParams {
    pub status: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[tracing::instrument(skip(state))]
pub async fn get_job_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    let uuid = match Uuid::parse_str(&job_id) {
        Ok(u) => u,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    detail: format!("Invalid job ID: {}", job_id),
                }),
            )
                .into_response();
        }
    };

    match state.job_repository.get_by_id(JobId::from_uuid(uuid)).await {
        Ok(Some(job)) => (StatusCode::OK, Json(JobResponse::from(&job))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                detail: "Job not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch job");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    detail: format!("Failed to fetch job: {}", e),
                }),
            )
                .into_response()
        }
    }
}

#[tracing::instrument(skip(state, params))]
pub async fn list_jobs_handler(
    State(state): State<AppState>,
    Query(params): Query<ListJobsParams>,
) -> impl IntoResponse {
    let jobs = match state.job_repository.list().await {
        Ok(jobs) => jobs,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list jobs");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    detail: format!("Failed to list jobs: {}", e),
                }),
            )
                .into_response();
        }
    };

    // Unknown status filter values are ignored rather than rejected.
    let status_filter: Option<JobStatus> = params
        .status
        .as_deref()
        .and_then(|s| s.to_uppercase().parse().ok());
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);

    let jobs: Vec<JobResponse> = jobs
        .iter()
        .filter(|job| status_filter.map_or(true, |status| job.status == status))
        .take(limit)
        .map(JobResponse::from)
        .collect();

    (
        StatusCode::OK,
        Json(JobListResponse {
            total: jobs.len(),
            jobs,
        }),
    )
        .into_response()
}
