//! Configuration management for the Calorie Tracker
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: CT__)

use anyhow::Result;
use calorie_tracker_shared::Locale;
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite file, or `:memory:`
    pub path: String,
    pub busy_timeout_secs: u64,
}

/// Front end configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub locale: Locale,
    /// Number of days shown by the trend view
    pub trend_days: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            trend_days: 7,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: "calories.db".to_string(),
                busy_timeout_secs: 5,
            },
            ui: UiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with CT__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., CT__DATABASE__PATH=/tmp/cal.db sets database.path
            .add_source(config::Environment::with_prefix("CT").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Parse configuration from a TOML document layered over the defaults
    pub fn from_toml(source: &str) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
