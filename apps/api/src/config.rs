use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_LLM_MODEL: &str = "claude-sonnet-4-5";
pub const DEFAULT_LLM_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Application configuration loaded from environment variables once at startup.
/// Every variable has a default; only malformed values are rejected.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_env: String,
    pub database_url: String,
    pub port: u16,
    pub log_level: String,
    /// When set, logs are also written to `<log_dir>/app.log`.
    pub log_dir: Option<PathBuf>,
    /// Raw provider selector. Parsed by the assistant after logging is up.
    pub llm_provider: String,
    pub llm_api_key: Option<String>,
    pub llm_model: String,
    pub llm_api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            app_env: env_or("APP_ENV", "development"),
            database_url: env_or("DATABASE_URL", "sqlite://job_assistant.db"),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            log_level: env_or("LOG_LEVEL", "info"),
            log_dir: optional_env("LOG_DIR").map(PathBuf::from),
            llm_provider: env_or("LLM_PROVIDER", "placeholder"),
            llm_api_key: optional_env("LLM_API_KEY"),
            llm_model: env_or("LLM_MODEL", DEFAULT_LLM_MODEL),
            llm_api_url: env_or("LLM_API_URL", DEFAULT_LLM_API_URL),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Blank values count as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
