mod http_status_client;
mod in_process_status_client;

pub use http_status_client::HttpStatusClient;
pub use in_process_status_client::InProcessStatusClient;
