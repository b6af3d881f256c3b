mod job;
mod job_id;
mod job_status;

pub use job::{Job, JobTransition, TransitionError};
pub use job_id::JobId;
pub use job_status::JobStatus;
