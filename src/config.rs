use serde::Deserialize;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
}

/// Runtime configuration for the attachment helpers.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Base URL of the task API; attachment uploads and reference URLs are
    /// rooted here.
    pub api_url: String,
    /// Optional base URL for the AI summarization service. When absent the
    /// summarizer targets the task API origin, matching how the web client
    /// calls the endpoint same-origin.
    pub ai_api_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: load_env("TASK_API_URL")?,
            ai_api_url: load_env_optional("TASK_AI_URL"),
        })
    }

    /// Base URL the summarization client should talk to.
    pub fn summarizer_url(&self) -> &str {
        self.ai_api_url.as_deref().unwrap_or(&self.api_url)
    }
}

fn load_env(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVariable(key.to_string()))
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        api_url = %config.api_url,
        ai_api_url = ?config.ai_api_url,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}

/// Install a fixed configuration for unit tests that never touch the
/// environment. Safe to call from multiple tests; the first caller wins.
#[cfg(test)]
pub(crate) fn init_test_config() {
    let _ = CONFIG.set(Config {
        api_url: "https://x.test".to_string(),
        ai_api_url: None,
    });
}
