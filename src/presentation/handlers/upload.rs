use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::services::AnalysisRequest;
use crate::domain::Job;
use crate::presentation::state::AppState;

const ALLOWED_EXTENSIONS: &[&str] = &[".pdf", ".jpg", ".jpeg", ".png", ".xlsx", ".xls", ".csv"];

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub jobs: Vec<JobDescriptor>,
}

#[derive(Serialize)]
pub struct JobDescriptor {
    pub id: String,
    pub filename: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

struct UploadedFile {
    filename: String,
    data: Vec<u8>,
}

/// Batch ingestion: one PENDING job per file, created atomically, queued for
/// analysis, and echoed back in submission order so the client can start
/// polling immediately.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut files: Vec<UploadedFile> = Vec::new();
    let mut ledger_name: Option<String> = None;
    let mut financial_year: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return bad_request(format!("Failed to read multipart: {}", e));
            }
        };

        match field.name().unwrap_or_default() {
            "files" => {
                let filename = field.file_name().unwrap_or("unknown").to_string();
                let data = match field.bytes().await {
                    Ok(d) => d.to_vec(),
                    Err(e) => {
                        tracing::error!(filename = %filename, error = %e, "Failed to read file bytes");
                        return bad_request(format!("Failed to read file {}: {}", filename, e));
                    }
                };
                files.push(UploadedFile { filename, data });
            }
            "ledgerName" => ledger_name = read_text_field(field).await,
            "financialYear" => financial_year = read_text_field(field).await,
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    if files.is_empty() {
        tracing::warn!("Upload request with no files");
        return bad_request("No files provided".to_string());
    }

    for file in &files {
        if let Err(detail) = check_extension(&file.filename) {
            tracing::warn!(filename = %file.filename, "Rejected file type");
            return bad_request(detail);
        }
    }

    let jobs: Vec<Job> = files
        .iter()
        .map(|f| Job::new(f.filename.clone(), ledger_name.clone(), financial_year.clone()))
        .collect();

    // One atomic batch: either every job exists or none do.
    if let Err(e) = state.job_repository.create_batch(&jobs).await {
        tracing::error!(error = %e, "Failed to create job batch");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                detail: format!("Failed to create jobs: {}", e),
            }),
        )
            .into_response();
    }

    for (job, file) in jobs.iter().zip(files) {
        let request = AnalysisRequest {
            job_id: job.id,
            filename: file.filename,
            data: file.data,
        };
        // A full queue leaves the job PENDING; the upload still succeeds.
        if let Err(e) = state.analysis_sender.try_send(request) {
            tracing::warn!(job_id = %job.id, error = %e, "Job created but not queued");
        }
    }

    let descriptors: Vec<JobDescriptor> = jobs
        .iter()
        .map(|job| JobDescriptor {
            id: job.id.to_string(),
            filename: job.filename.clone(),
            status: job.status.as_str().to_string(),
        })
        .collect();

    tracing::info!(count = descriptors.len(), "Documents accepted for analysis");

    (
        StatusCode::CREATED,
        Json(UploadResponse {
            message: format!("Successfully uploaded {} files", descriptors.len()),
            jobs: descriptors,
        }),
    )
        .into_response()
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Option<String> {
    match field.text().await {
        Ok(text) if !text.is_empty() => Some(text),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read text field");
            None
        }
    }
}

fn check_extension(filename: &str) -> Result<(), String> {
    let extension = filename
        .rfind('.')
        .map(|i| filename[i..].to_lowercase())
        .unwrap_or_default();
    if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(format!(
            "File type {} not allowed for file {}",
            extension, filename
        ))
    }
}

fn bad_request(detail: String) -> axum::response::Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { detail })).into_response()
}
