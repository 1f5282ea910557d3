//! Application context
//!
//! Everything a screen needs, owned in one place and passed by reference:
//! settings, services, the host session and acting user, the clock and the
//! shared event list. There are no global stores.

use std::sync::Arc;
use std::time::Duration;
use chrono::FixedOffset;
use tracing::{info, warn};
use crate::config::Settings;
use crate::host::{HostSession, HostShell};
use crate::models::user::User;
use crate::services::ServiceFactory;
use crate::state::event_detail::EventDetail;
use crate::state::feed::NotificationFeed;
use crate::state::form::EventForm;
use crate::state::navigation::Navigator;
use crate::state::store::EventListStore;
use crate::utils::clock::SharedClock;
use crate::utils::errors::Result;

#[derive(Debug)]
pub struct AppContext {
    pub settings: Settings,
    pub services: ServiceFactory,
    pub session: HostSession,
    pub current_user: User,
    pub clock: SharedClock,
    pub events: EventListStore,
}

impl AppContext {
    /// Build the context from settings; the init data must identify a user
    pub fn new(settings: Settings, clock: SharedClock) -> Result<Self> {
        let session = HostSession::parse(&settings.host.init_data)?;
        let current_user = session.current_user()?;
        let services = ServiceFactory::new(&settings)?;
        let events = EventListStore::new(services.event_service.clone());

        info!(user_id = %current_user.id, "Application context ready");

        Ok(Self {
            settings,
            services,
            session,
            current_user,
            clock,
            events,
        })
    }

    pub fn offset(&self) -> FixedOffset {
        self.settings.utc_offset()
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.settings.ui.toast_duration_ms)
    }

    pub fn navigator(&self, shell: Arc<dyn HostShell>) -> Navigator {
        Navigator::from_start_param(shell, self.session.start_param.as_deref())
    }

    pub async fn open_event(&self, event_id: &str) -> Result<EventDetail> {
        EventDetail::load(
            self.services.event_service.clone(),
            event_id,
            self.current_user.clone(),
            self.clock.clone(),
            self.offset(),
            &self.settings.host.bot_url,
            self.toast_duration(),
        )
        .await
    }

    pub fn new_event_form(&self) -> EventForm {
        EventForm::new(self.clock.clone(), self.offset(), self.toast_duration())
    }

    /// Submit a create form; the new event invalidates the shared list
    pub async fn create_event(&mut self, form: &mut EventForm, description: Option<String>) -> Result<String> {
        let service = self.services.event_service.clone();
        let id = form
            .submit(|submission| async move {
                service.create_event(&submission.into_payload(description)).await
            })
            .await?;

        self.events.invalidate();
        Ok(id)
    }

    pub fn notification_feed(&self) -> NotificationFeed {
        NotificationFeed::new(
            self.services.notification_service.clone(),
            self.settings.feed.page_size,
            self.settings.feed.lookahead_px,
        )
    }

    /// Inbox lines for the loaded feed, naming events from the shared list.
    /// An unavailable list is logged and the lines fall back to placeholder names.
    pub async fn describe_notifications(&mut self, feed: &NotificationFeed) -> Vec<String> {
        match self.events.get().await {
            Ok(events) => feed.describe_all(events),
            Err(e) => {
                warn!(error = %e, "Event list unavailable, notifications use placeholder names");
                feed.describe_all(&[])
            }
        }
    }
}
