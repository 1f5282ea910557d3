//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the GeoHod client.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{GeoHodError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "geohod.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = if config.json {
        tracing_subscriber::fmt::layer().json().with_writer(non_blocking).boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(non_blocking).boxed()
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| GeoHodError::Config(format!("logging already initialised: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log an event lifecycle action
pub fn log_event_action(event_id: &str, action: &str, user_id: Option<&str>, details: Option<&str>) {
    info!(
        event_id = event_id,
        action = action,
        user_id = user_id,
        details = details,
        "Event action performed"
    );
}

/// Log an outgoing backend call
pub fn log_api_call(method: &str, path: &str, status: u16, duration_ms: u64) {
    debug!(
        method = method,
        path = path,
        status = status,
        duration_ms = duration_ms,
        "Backend call completed"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log a notification page arriving at the feed
pub fn log_notification_page(cursor: Option<i64>, received: usize, has_more: bool) {
    if has_more {
        debug!(cursor = cursor, received = received, "Notification page loaded");
    } else {
        info!(cursor = cursor, received = received, "Notification feed exhausted");
    }
}

/// Log a rejected user intent
pub fn log_rejected_intent(event_id: &str, intent: &str, reason: &str) {
    warn!(
        event_id = event_id,
        intent = intent,
        reason = reason,
        "Intent rejected by visibility policy"
    );
}
