use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub port: u16,
    pub api_key: String,
    pub congress_api_key: String,
    pub congress_api_base_url: String,
    pub disable_proxy: bool,
    pub cache_enabled: bool,
    /// Seconds before a cached vote dataset is refetched. `None` keeps entries forever.
    pub votes_cache_ttl: Option<u64>,
    pub http_timeout_secs: u64,
    pub db_path: String,
}

impl AppConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
