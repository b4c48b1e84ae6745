//! Chat provider configuration.
//!
//! The only deployment-level configuration the core carries: where the
//! text-completion provider lives and how to authenticate against it. The
//! binary loads `.env` first via `dotenvy`.

use std::time::Duration;

const DEFAULT_MODEL: &str = "general-1";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Clone, Debug)]
pub struct ChatConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl ChatConfig {
    /// Read configuration from `PRIMERSTORE_CHAT_*` environment variables.
    /// Endpoint and API key are required; model and timeout have defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint = require("PRIMERSTORE_CHAT_ENDPOINT")?;
        let api_key = require("PRIMERSTORE_CHAT_API_KEY")?;
        let model =
            std::env::var("PRIMERSTORE_CHAT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout = std::env::var("PRIMERSTORE_CHAT_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        Ok(Self { endpoint, api_key, model, timeout })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),
}
