use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database_url: String,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Deadline for each data-access call made while serving a request.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_query_timeout_ms() -> u64 {
    5000
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read config file '{path}': {e}"))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let config: AppConfig = toml::from_str(content)?;

        if config.max_connections == 0 {
            return Err("max_connections must be at least 1".into());
        }
        if config.query_timeout_ms == 0 {
            return Err("query_timeout_ms must be greater than zero".into());
        }

        Ok(config)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}
