//! GeoHod mini app core
//!
//! Client-side core of the GeoHod Telegram Mini App for organizing and
//! joining local group events. This library provides the typed REST client,
//! the event form validator, the event detail view-model with its lifecycle
//! intents, and the paginated notification feed.

pub mod config;
pub mod host;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{GeoHodError, Result};

// Re-export main components for easy access
pub use services::ServiceFactory;
pub use state::{AppContext, EventDetail, EventForm, NotificationFeed};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
