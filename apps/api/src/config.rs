use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Context, Result};

/// Application configuration loaded from environment variables.
/// Without `LLM_API_KEY` the service answers from its canned fallback table.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: Option<String>,
    pub llm_timeout_secs: u64,
    /// Sessions untouched for this long are dropped.
    pub session_idle_secs: u64,
    pub session_sweep_secs: u64,
    /// Résumé installed into every new session, read once at startup.
    pub resume_path: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let session_sweep_secs = std::env::var("SESSION_SWEEP_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u64>()
            .context("SESSION_SWEEP_SECS must be a whole number of seconds")?;
        ensure!(session_sweep_secs > 0, "SESSION_SWEEP_SECS must be at least 1");

        Ok(Config {
            llm_api_key: optional_env("LLM_API_KEY"),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            session_idle_secs: std::env::var("SESSION_IDLE_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse::<u64>()
                .context("SESSION_IDLE_SECS must be a whole number of seconds")?,
            session_sweep_secs,
            resume_path: optional_env("RESUME_PATH").map(PathBuf::from),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }

    pub fn session_sweep(&self) -> Duration {
        Duration::from_secs(self.session_sweep_secs)
    }
}

/// Unset and blank values both read as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
