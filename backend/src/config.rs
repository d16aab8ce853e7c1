//! Configuration management for the bite forecast bot
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with BITE_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    pub server: ServerConfig,

    pub database: DatabaseConfig,

    /// Telegram Bot API configuration
    pub telegram: TelegramConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    pub forecast: ForecastConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather
    pub bot_token: String,

    /// Value Telegram echoes in X-Telegram-Bot-Api-Secret-Token. Empty
    /// disables the check.
    pub webhook_secret: String,

    /// Bot API base URL
    pub api_base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// OpenWeatherMap 2.5 endpoint
    pub api_endpoint: String,

    pub api_key: String,

    /// Unit system passed to the provider; scoring expects metric
    pub units: String,

    /// Language for provider descriptions
    pub lang: String,

    /// Per-request timeout
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    /// Number of days in a bite forecast, today included
    pub days: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("BITE_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("telegram.api_base_url", "https://api.telegram.org")?
            .set_default("telegram.webhook_secret", "")?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.units", "metric")?
            .set_default("weather.lang", "en")?
            .set_default("weather.timeout_secs", 10)?
            .set_default("forecast.days", 3)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (BITE_ prefix)
            .add_source(
                Environment::with_prefix("BITE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self { days: 3 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_address() {
        assert_eq!(ServerConfig::default().bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_default_forecast_window() {
        assert_eq!(ForecastConfig::default().days, 3);
    }
}
