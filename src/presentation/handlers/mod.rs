mod catalog;
mod health;
mod jobs;
mod upload;

pub use catalog::{financial_years_handler, ledgers_handler};
pub use health::health_handler;
pub use jobs::{get_job_handler, list_jobs_handler};
pub use upload::upload_handler;
