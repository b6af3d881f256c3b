mod analysis_worker;
mod job_tracker;

pub use analysis_worker::{AnalysisRequest, AnalysisWorker};
pub use job_tracker::JobTracker;
