//! Application configuration.
//!
//! Everything a tool needs at runtime (base URLs, timeouts, truncation caps,
//! retry bounds) lives here and is handed to the tool at construction time.
//! Values come from an optional TOML file with per-field defaults; secrets
//! and the model name can be overridden from the environment.

use crate::error::ConfigError;
use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable selecting the chat model.
pub const MODEL_ENV: &str = "DAYBRIEF_MODEL";

/// Environment variable carrying the LLM API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub scrape: ScrapeConfig,

    #[serde(default)]
    pub news: NewsConfig,

    #[serde(default)]
    pub kbo: KboConfig,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub agent: AgentConfig,
}

/// Outbound HTTP defaults shared by every tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Maximum number of characters returned from a scraped page.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Entries returned when the caller does not pass `max_items`.
    #[serde(default = "default_max_items")]
    pub default_max_items: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KboConfig {
    #[serde(default = "default_rank_url")]
    pub rank_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_geocode_url")]
    pub geocode_url: String,

    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Retry bounds for the geocoding lookup.
    #[serde(default)]
    pub retry: RetryPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer token for the inference API. Filled from the environment,
    /// never from the config file.
    #[serde(skip)]
    pub api_key: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Retry bounds for transient inference-API failures (429/5xx).
    #[serde(default = "default_llm_retry")]
    pub retry: RetryPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Upper bound on reasoning-loop iterations per user turn.
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; daybrief/0.1)".to_string()
}

fn default_max_chars() -> usize {
    5000
}

fn default_feed_url() -> String {
    "https://news.google.com/rss?hl=ko&gl=KR&ceid=KR:ko".to_string()
}

fn default_max_items() -> usize {
    10
}

fn default_rank_url() -> String {
    "https://sports.daum.net/prx/hermes/api/team/rank.json?leagueCode=kbo".to_string()
}

fn default_geocode_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_timezone() -> String {
    "Asia/Seoul".to_string()
}

fn default_llm_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_llm_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        multiplier_secs: 1,
        min_delay_secs: 1,
        max_delay_secs: 10,
    }
}

fn default_max_steps() -> usize {
    8
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            default_max_items: default_max_items(),
        }
    }
}

impl Default for KboConfig {
    fn default() -> Self {
        Self {
            rank_url: default_rank_url(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocode_url: default_geocode_url(),
            forecast_url: default_forecast_url(),
            timezone: default_timezone(),
            retry: RetryPolicy::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_model(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: None,
            retry: default_llm_retry(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::Read(path.display().to_string(), e))?;
            toml::from_str(&content)
                .map_err(|e| ConfigError::Parse(path.display().to_string(), e))?
        } else {
            tracing::info!("configuration file not found, using defaults");
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    /// Fold environment overrides into the loaded configuration.
    pub fn apply_env(&mut self) {
        if let Ok(model) = std::env::var(MODEL_ENV) {
            if !model.is_empty() {
                self.llm.model = model;
            }
        }
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                self.llm.api_key = Some(key);
            }
        }
    }
}
