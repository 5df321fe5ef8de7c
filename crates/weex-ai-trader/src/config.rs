/*
[INPUT]:  YAML configuration file and process environment
[OUTPUT]: Parsed trader configuration and credential material
[POS]:    Configuration layer - cycle setup
[UPDATE]: When adding new configuration options
*/

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration for the trading loop
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TraderConfig {
    /// Contract symbol to trade (e.g. "cmt_btcusdt")
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Exchange REST base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Cycle interval in minutes; cycles fire on wall-clock boundaries
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,
    /// Model identifier sent to the completion endpoint
    #[serde(default = "default_model")]
    pub model: String,
    /// Completion API base URL (OpenAI-compatible)
    #[serde(default = "default_llm_base_url")]
    pub llm_base_url: String,
    /// Sampling temperature for the completion request
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Root directory for per-cycle artifact folders
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,
    /// Pause after a cycle that completed normally
    #[serde(default = "default_success_cooldown_secs")]
    pub success_cooldown_secs: u64,
    /// Pause after a cycle that aborted with an error
    #[serde(default = "default_failure_cooldown_secs")]
    pub failure_cooldown_secs: u64,
}

impl Default for TraderConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            base_url: default_base_url(),
            interval_minutes: default_interval_minutes(),
            model: default_model(),
            llm_base_url: default_llm_base_url(),
            temperature: default_temperature(),
            artifact_dir: default_artifact_dir(),
            success_cooldown_secs: default_success_cooldown_secs(),
            failure_cooldown_secs: default_failure_cooldown_secs(),
        }
    }
}

fn default_symbol() -> String {
    "cmt_btcusdt".to_string()
}

fn default_base_url() -> String {
    weex_adapter::http::DEFAULT_BASE_URL.to_string()
}

fn default_interval_minutes() -> u64 {
    5
}

fn default_model() -> String {
    "deepseek/deepseek-r1".to_string()
}

fn default_llm_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("trading-data")
}

fn default_success_cooldown_secs() -> u64 {
    10
}

fn default_failure_cooldown_secs() -> u64 {
    60
}

impl TraderConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.interval_minutes == 0 {
            anyhow::bail!("interval_minutes must be at least 1");
        }
        if self.symbol.is_empty() {
            anyhow::bail!("symbol must not be empty");
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            anyhow::bail!("temperature must be within [0.0, 2.0]");
        }
        Ok(())
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_minutes * 60
    }
}

/// Secret material pulled from the environment, never from the YAML file.
/// Exchange credentials are optional; without them the loop runs in
/// observe-only mode and skips order placement.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub weex_api_key: String,
    pub weex_secret_key: String,
    pub weex_passphrase: String,
    pub llm_api_key: String,
}

impl Secrets {
    pub fn from_env() -> anyhow::Result<Self> {
        let llm_api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENROUTER_API_KEY must be set"))?;
        Ok(Self {
            weex_api_key: std::env::var("WEEX_API_KEY").unwrap_or_default(),
            weex_secret_key: std::env::var("WEEX_SECRET_KEY").unwrap_or_default(),
            weex_passphrase: std::env::var("WEEX_PASSPHRASE").unwrap_or_default(),
            llm_api_key,
        })
    }

    pub fn has_exchange_credentials(&self) -> bool {
        !self.weex_api_key.is_empty()
            && !self.weex_secret_key.is_empty()
            && !self.weex_passphrase.is_empty()
    }
}
