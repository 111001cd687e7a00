use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, time::Duration};

use caloriewise_assistant::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiSettings};
use caloriewise_meal::DEFAULT_DAILY_GOAL;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct TrackerConfig {
    #[serde(default = "default_daily_goal")]
    pub daily_goal: u32,
    /// Delay before the "goal exceeded" prompt opens on the dashboard.
    #[serde(default = "default_suggestion_delay_ms")]
    pub suggestion_delay_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            daily_goal: default_daily_goal(),
            suggestion_delay_ms: default_suggestion_delay_ms(),
        }
    }
}

fn default_daily_goal() -> u32 {
    DEFAULT_DAILY_GOAL
}

fn default_suggestion_delay_ms() -> u64 {
    500
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssistantConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            temperature: None,
        }
    }
}

impl AssistantConfig {
    pub fn gemini_settings(&self) -> GeminiSettings {
        GeminiSettings {
            api_key: self.api_key.to_owned(),
            model: self.model.to_owned(),
            base_url: self.base_url.to_owned(),
            timeout: Duration::from_secs(self.timeout_secs),
            temperature: self.temperature,
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. `GEMINI_API_KEY` / `GOOGLE_API_KEY`
    /// 2. Environment variables (CALORIEWISE__SERVER__PORT, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored when missing
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("CALORIEWISE")
                .separator("__")
                .try_parsing(true),
        );

        // Standard Google client variables
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());

        if let Some(api_key) = api_key {
            builder = builder.set_override("assistant.api_key", api_key)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.tracker.daily_goal == 0 {
            return Err("Daily calorie goal must be greater than 0".to_string());
        }
        if self.assistant.model.trim().is_empty() {
            return Err("Assistant model must not be empty".to_string());
        }
        if self.assistant.timeout_secs == 0 {
            return Err("Assistant timeout must be at least 1 second".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            observability: ObservabilityConfig::default(),
            tracker: TrackerConfig::default(),
            assistant: AssistantConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = config();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_goal() {
        let mut config = config();
        config.tracker.daily_goal = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_model() {
        let mut config = config();
        config.assistant.model = " ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut config = config();
        config.assistant.timeout_secs = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = config();

        assert_eq!(config.tracker.daily_goal, 2000);
        assert_eq!(config.tracker.suggestion_delay_ms, 500);
        assert_eq!(config.assistant.model, DEFAULT_MODEL);
        assert!(config.assistant.api_key.is_empty());
    }

    #[test]
    fn test_gemini_settings() {
        let mut config = config();
        config.assistant.api_key = "key".to_string();
        config.assistant.timeout_secs = 5;
        config.assistant.temperature = Some(0.4);

        let settings = config.assistant.gemini_settings();
        assert_eq!(settings.api_key, "key");
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.temperature, Some(0.4));
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }
}
