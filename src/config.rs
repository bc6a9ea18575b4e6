//! Configuration management for WanderWise server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::error::{AppError, AppResult};

/// Message shown when either provider credential is missing
pub const MISSING_CREDENTIALS_MESSAGE: &str =
    "Missing API keys. Please configure GEMINI_API_KEY and OPENWEATHER_API_KEY in your .env file.";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Generative model provider settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
    pub timeout_seconds: u64,
}

/// Geocoding and forecast provider settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub geocoding_url: String,
    pub forecast_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlannerConfig {
    /// How many days ahead the forecast provider can serve
    pub forecast_horizon_days: i64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
}

/// Both provider credentials, resolved once per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub gemini_api_key: String,
    pub weather_api_key: String,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(env_source())
            .set_override_option("gemini.api_key", env::var("GEMINI_API_KEY").ok())?
            .set_override_option("weather.api_key", env::var("OPENWEATHER_API_KEY").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Resolve both credentials or fail with a configuration error.
    ///
    /// Blank values count as missing.
    pub fn credentials(&self) -> AppResult<Credentials> {
        match (
            non_blank(self.gemini.api_key.as_deref()),
            non_blank(self.weather.api_key.as_deref()),
        ) {
            (Some(gemini), Some(weather)) => Ok(Credentials {
                gemini_api_key: gemini.to_string(),
                weather_api_key: weather.to_string(),
            }),
            _ => Err(AppError::Configuration(MISSING_CREDENTIALS_MESSAGE.to_string())),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            temperature: 0.85,
            top_p: 0.9,
            max_output_tokens: 4000,
            timeout_seconds: 60,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            geocoding_url: "http://api.openweathermap.org/geo/1.0/direct".to_string(),
            forecast_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            timeout_seconds: 15,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            forecast_horizon_days: 7,
        }
    }
}

/// `WANDERWISE_*` variables; `__` separates nested keys, e.g. `WANDERWISE_SERVER__PORT=9000`
fn env_source() -> Environment {
    Environment::with_prefix("WANDERWISE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use config::Map;

    use super::*;

    fn with_keys(gemini: Option<&str>, weather: Option<&str>) -> AppConfig {
        let mut config = AppConfig::default();
        config.gemini.api_key = gemini.map(str::to_string);
        config.weather.api_key = weather.map(str::to_string);
        config
    }

    #[test]
    fn test_credentials_present() {
        let creds = with_keys(Some("g-key"), Some("w-key")).credentials().unwrap();
        assert_eq!(creds.gemini_api_key, "g-key");
        assert_eq!(creds.weather_api_key, "w-key");
    }

    #[test]
    fn test_credentials_missing_either() {
        for config in [
            with_keys(None, Some("w")),
            with_keys(Some("g"), None),
            with_keys(None, None),
            with_keys(Some("  "), Some("w")),
        ] {
            match config.credentials() {
                Err(AppError::Configuration(msg)) => assert_eq!(msg, MISSING_CREDENTIALS_MESSAGE),
                other => panic!("expected configuration error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.planner.forecast_horizon_days, 7);
        assert_eq!(config.gemini.max_output_tokens, 4000);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_env_nested_keys_use_double_underscore() {
        let vars: Map<String, String> = [
            ("WANDERWISE_SERVER__PORT", "9090"),
            ("WANDERWISE_PLANNER__FORECAST_HORIZON_DAYS", "5"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::builder()
            .add_source(env_source().source(Some(vars)))
            .build()
            .unwrap();
        assert_eq!(config.get::<u16>("server.port").unwrap(), 9090);
        assert_eq!(config.get::<i64>("planner.forecast_horizon_days").unwrap(), 5);
    }
}
