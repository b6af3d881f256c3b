use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub polling: PollingSettings,
    pub worker: WorkerSettings,
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingSettings {
    /// Client poll cadence in seconds.
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkerSettings {
    pub queue_capacity: usize,
}

/// Reporting-period catalogs served to clients before upload.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    pub financial_years: Vec<String>,
    pub ledgers: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            polling: PollingSettings { interval_secs: 3 },
            worker: WorkerSettings { queue_capacity: 64 },
            catalog: CatalogSettings {
                financial_years: vec![
                    "2022-23".to_string(),
                    "2023-24".to_string(),
                    "2024-25".to_string(),
                    "2025-26".to_string(),
                ],
                ledgers: vec![
                    "State Bank of India".to_string(),
                    "HDFC Bank".to_string(),
                    "ICICI Bank".to_string(),
                    "Petty Cash".to_string(),
                    "Sales Account".to_string(),
                    "Purchase Account".to_string(),
                ],
            },
        }
    }
}

impl Settings {
    /// Defaults overridden by environment variables where set.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            settings.server.host = host;
        }
        if let Some(port) = env_parse("SERVER_PORT") {
            settings.server.port = port;
        }
        if let Some(secs) = env_parse("POLL_INTERVAL_SECS") {
            settings.polling.interval_secs = secs;
        }
        if let Some(capacity) = env_parse("WORKER_QUEUE_CAPACITY") {
            settings.worker.queue_capacity = capacity;
        }
        settings
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
