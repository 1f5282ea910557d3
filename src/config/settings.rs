//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};
use chrono::FixedOffset;
use crate::utils::helpers::offset_from_minutes;

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiConfig,
    pub host: HostConfig,
    pub feed: FeedConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// REST backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base url including the `/api/v1` prefix
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// Telegram host configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostConfig {
    /// Mini app link used to build registration links
    pub bot_url: String,
    /// Raw init-data string forwarded as the `Authorization` header
    pub init_data: String,
    /// Minutes east of UTC used for calendar-day comparisons
    pub utc_offset_minutes: i32,
}

/// Notification feed configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    pub page_size: u32,
    pub lookahead_px: u32,
}

/// Presentation timings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    pub toast_duration_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_file("config")
    }

    /// Load settings from a specific file (extension optional), then apply
    /// `GEOHOD_SECTION__KEY` environment overrides
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("GEOHOD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::GeoHodError> {
        super::validation::validate_settings(self)
    }

    /// Offset used for every "today" comparison
    pub fn utc_offset(&self) -> FixedOffset {
        offset_from_minutes(self.host.utc_offset_minutes)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8080/api/v1".to_string(),
                timeout_seconds: 10,
                user_agent: "GeoHod-MiniApp/1.0".to_string(),
            },
            host: HostConfig {
                bot_url: "https://t.me/geohod_bot/app".to_string(),
                init_data: String::new(),
                utc_offset_minutes: 0,
            },
            feed: FeedConfig {
                page_size: 20,
                lookahead_px: 200,
            },
            ui: UiConfig {
                toast_duration_ms: 3000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
                json: false,
            },
        }
    }
}
