//! Services module
//!
//! This module contains the network boundary: the REST transport and the
//! typed resource clients built on top of it.

pub mod api;
pub mod events;
pub mod notifications;

// Re-export commonly used services
pub use api::ApiClient;
pub use events::EventService;
pub use notifications::NotificationService;

use crate::config::settings::Settings;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone, Debug)]
pub struct ServiceFactory {
    pub event_service: EventService,
    pub notification_service: NotificationService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory sharing one HTTP client
    pub fn new(settings: &Settings) -> Result<Self> {
        let api = ApiClient::new(&settings.api, &settings.host.init_data)?;

        Ok(Self {
            event_service: EventService::new(api.clone()),
            notification_service: NotificationService::new(api),
        })
    }
}
