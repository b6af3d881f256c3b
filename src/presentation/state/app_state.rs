use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::ports::JobRepository;
use crate::application::services::AnalysisRequest;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub job_repository: Arc<dyn JobRepository>,
    pub analysis_sender: mpsc::Sender<AnalysisRequest>,
    pub settings: Settings,
}
