use serde_json::json;

use ledgerlens::domain::{Job, JobStatus, JobTransition};

fn new_job() -> Job {
    Job::new(
        "invoice.pdf".to_string(),
        Some("ACME".to_string()),
        Some("2023-24".to_string()),
    )
}

#[test]
fn given_new_job_then_pending_with_no_result_or_error() {
    let job = new_job();

    assert_eq!(job.status, JobStatus::Pending);
    assert!(job.result.is_none());
    assert!(job.error.is_none());
    assert_eq!(job.ledger_name.as_deref(), Some("ACME"));
    assert_eq!(job.financial_year.as_deref(), Some("2023-24"));
}

#[test]
fn given_pending_job_when_processing_then_status_advances() {
    let mut job = new_job();

    job.apply(JobTransition::Processing).expect("valid transition");

    assert_eq!(job.status, JobStatus::Processing);
    assert!(job.result.is_none());
    assert!(job.error.is_none());
}

#[test]
fn given_processing_job_when_completed_then_result_is_attached() {
    let mut job = new_job();
    job.apply(JobTransition::Processing).unwrap();

    job.apply(JobTransition::Completed(json!({"amount": 100})))
        .expect("valid transition");

    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.result, Some(json!({"amount": 100})));
    assert!(job.error.is_none());
}

#[test]
fn given_processing_job_when_failed_then_error_is_attached() {
    let mut job = new_job();
    job.apply(JobTransition::Processing).unwrap();

    job.apply(JobTransition::Failed("engine timeout".to_string()))
        .expect("valid transition");

    assert_eq!(job.status, JobStatus::Failed);
    assert_eq!(job.error.as_deref(), Some("engine timeout"));
    assert!(job.result.is_none());
}

#[test]
fn given_completed_job_when_mutated_then_transition_is_refused_and_job_unchanged() {
    let mut job = new_job();
    job.apply(JobTransition::Processing).unwrap();
    job.apply(JobTransition::Completed(json!({"amount": 100})))
        .unwrap();
    let before = job.clone();

    assert!(job.apply(JobTransition::Processing).is_err());
    assert!(job.apply(JobTransition::Failed("late".to_string())).is_err());
    assert!(job.apply(JobTransition::Completed(json!(null))).is_err());

    assert_eq!(job, before);
}

#[test]
fn given_failed_job_when_mutated_then_transition_is_refused_and_job_unchanged() {
    let mut job = new_job();
    job.apply(JobTransition::Failed("bad file".to_string()))
        .unwrap();
    let before = job.clone();

    assert!(job.apply(JobTransition::Processing).is_err());
    assert!(
        job.apply(JobTransition::Completed(json!({"late": true})))
            .is_err()
    );

    assert_eq!(job, before);
}

#[test]
fn given_processing_job_when_moved_back_to_processing_then_refused() {
    let mut job = new_job();
    job.apply(JobTransition::Processing).unwrap();

    assert!(job.apply(JobTransition::Processing).is_err());
}

#[test]
fn given_failed_job_without_message_then_display_error_falls_back() {
    let mut job = new_job();
    job.apply(JobTransition::Failed("disk full".to_string()))
        .unwrap();
    assert_eq!(job.display_error(), "disk full");

    let pending = new_job();
    assert_eq!(pending.display_error(), "Unknown error");
}

#[test]
fn given_status_strings_then_parse_and_display_round_trip() {
    for status in [
        JobStatus::Pending,
        JobStatus::Processing,
        JobStatus::Completed,
        JobStatus::Failed,
    ] {
        let parsed: JobStatus = status.as_str().parse().expect("known literal");
        assert_eq!(parsed, status);
    }
    assert!("RUNNING".parse::<JobStatus>().is_err());
}

#[test]
fn given_terminal_statuses_then_is_terminal_is_exact() {
    assert!(!JobStatus::Pending.is_terminal());
    assert!(!JobStatus::Processing.is_terminal());
    assert!(JobStatus::Completed.is_terminal());
    assert!(JobStatus::Failed.is_terminal());
}
