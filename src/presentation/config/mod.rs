mod settings;

pub use settings::{CatalogSettings, PollingSettings, ServerSettings, Settings, WorkerSettings};
