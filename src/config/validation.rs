//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use url::Url;
use crate::utils::errors::{GeoHodError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_host_config(&settings.host)?;
    validate_feed_config(&settings.feed)?;
    validate_ui_config(&settings.ui)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate backend configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(GeoHodError::Config(
            "API base URL is required".to_string()
        ));
    }

    let url = Url::parse(&config.base_url)
        .map_err(|e| GeoHodError::Config(format!("Invalid API base URL: {}", e)))?;
    if url.cannot_be_a_base() {
        return Err(GeoHodError::Config(
            "API base URL must be hierarchical".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(GeoHodError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate host configuration
fn validate_host_config(config: &super::HostConfig) -> Result<()> {
    if config.bot_url.is_empty() {
        return Err(GeoHodError::Config(
            "Bot URL is required".to_string()
        ));
    }

    Url::parse(&config.bot_url)
        .map_err(|e| GeoHodError::Config(format!("Invalid bot URL: {}", e)))?;

    if config.utc_offset_minutes.abs() > 14 * 60 {
        return Err(GeoHodError::Config(
            format!("UTC offset out of range: {} minutes", config.utc_offset_minutes)
        ));
    }

    Ok(())
}

fn validate_feed_config(config: &super::FeedConfig) -> Result<()> {
    if config.page_size == 0 {
        return Err(GeoHodError::Config(
            "Notification page size must be greater than 0".to_string()
        ));
    }

    Ok(())
}

fn validate_ui_config(config: &super::UiConfig) -> Result<()> {
    if config.toast_duration_ms == 0 {
        return Err(GeoHodError::Config(
            "Toast duration must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(GeoHodError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(GeoHodError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
