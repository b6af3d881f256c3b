use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{JobId, JobStatus};

/// One unit of per-document asynchronous work.
///
/// `result` is present iff the job completed, `error` iff it failed; both are
/// absent while the job is non-terminal. Status only moves forward:
/// PENDING -> PROCESSING -> {COMPLETED | FAILED}.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub filename: String,
    pub status: JobStatus,
    pub ledger_name: Option<String>,
    pub financial_year: Option<String>,
    pub result: Option<Value>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Forward transition requested against a job.
#[derive(Debug, Clone)]
pub enum JobTransition {
    Processing,
    Completed(Value),
    Failed(String),
}

impl JobTransition {
    pub fn target_status(&self) -> JobStatus {
        match self {
            JobTransition::Processing => JobStatus::Processing,
            JobTransition::Completed(_) => JobStatus::Completed,
            JobTransition::Failed(_) => JobStatus::Failed,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid transition for job {id}: {from} -> {to}")]
pub struct TransitionError {
    pub id: JobId,
    pub from: JobStatus,
    pub to: JobStatus,
}

impl Job {
    pub fn new(
        filename: String,
        ledger_name: Option<String>,
        financial_year: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            filename,
            status: JobStatus::Pending,
            ledger_name,
            financial_year,
            result: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a forward transition, rejecting terminal mutation and
    /// backward moves. Stores enforce monotonicity by going through here.
    pub fn apply(&mut self, transition: JobTransition) -> Result<(), TransitionError> {
        let to = transition.target_status();
        let allowed = match (self.status, to) {
            (JobStatus::Pending, JobStatus::Processing) => true,
            (JobStatus::Pending, JobStatus::Completed) => true,
            (JobStatus::Pending, JobStatus::Failed) => true,
            (JobStatus::Processing, JobStatus::Completed) => true,
            (JobStatus::Processing, JobStatus::Failed) => true,
            _ => false,
        };
        if !allowed {
            return Err(TransitionError {
                id: self.id,
                from: self.status,
                to,
            });
        }

        match transition {
            JobTransition::Processing => {}
            JobTransition::Completed(result) => self.result = Some(result),
            JobTransition::Failed(message) => self.error = Some(message),
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Error text shown for a failed job, with a fallback when the worker
    /// recorded none.
    pub fn display_error(&self) -> &str {
        self.error.as_deref().unwrap_or("Unknown error")
    }
}
