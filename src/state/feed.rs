//! Notification inbox loader
//!
//! Cursor pagination over `GET /notifications`. A page shorter than the
//! limit ends the feed, and so does a failed page: loaded items stay, no
//! further requests are made until the feed is opened again.

use std::collections::HashSet;
use tracing::warn;
use crate::models::event::Event;
use crate::models::notification::{Notification, NotificationQuery};
use crate::services::NotificationService;
use crate::utils::errors::Result;
use crate::utils::logging::log_notification_page;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Holds the feed's in-flight flag for one page request. The flag is
/// cleared on drop, so a cancelled `load_more` future does not wedge the feed.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

#[derive(Debug)]
pub struct NotificationFeed {
    service: NotificationService,
    page_size: u32,
    lookahead_px: u32,
    items: Vec<Notification>,
    seen: HashSet<i64>,
    cursor: Option<i64>,
    has_more: bool,
    loading: bool,
    requests: u32,
    last_error: Option<String>,
}

impl NotificationFeed {
    pub fn new(service: NotificationService, page_size: u32, lookahead_px: u32) -> Self {
        Self {
            service,
            page_size: page_size.max(1),
            lookahead_px,
            items: Vec::new(),
            seen: HashSet::new(),
            cursor: None,
            has_more: true,
            loading: false,
            requests: 0,
            last_error: None,
        }
    }

    /// Feed screen opened: start from the newest notification again
    pub fn open(&mut self) {
        self.items.clear();
        self.seen.clear();
        self.cursor = None;
        self.has_more = true;
        self.loading = false;
        self.requests = 0;
        self.last_error = None;
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn cursor(&self) -> Option<i64> {
        self.cursor
    }

    /// Pages requested since the feed was opened
    pub fn requests(&self) -> u32 {
        self.requests
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read).count()
    }

    /// Fetch the next page. Returns how many items were appended; a no-op
    /// returning 0 while a page is in flight or once the feed is exhausted.
    pub async fn load_more(&mut self) -> usize {
        if self.loading || !self.has_more {
            return 0;
        }

        let _in_flight = InFlight::start(&mut self.loading);
        self.requests += 1;

        let query = NotificationQuery {
            limit: self.page_size,
            cursor_id_after: self.cursor,
            is_read: None,
        };

        match self.service.get_notifications(&query).await {
            Ok(page) => {
                let received = page.len();
                self.has_more = received == self.page_size as usize;
                if let Some(last) = page.last() {
                    self.cursor = Some(last.id);
                }

                let before = self.items.len();
                for notification in page {
                    if self.seen.insert(notification.id) {
                        self.items.push(notification);
                    }
                }

                log_notification_page(query.cursor_id_after, received, self.has_more);
                self.items.len() - before
            }
            Err(e) => {
                warn!(cursor = ?query.cursor_id_after, error = %e, "Notification page failed, stopping feed");
                self.has_more = false;
                self.last_error = Some(e.user_message());
                0
            }
        }
    }

    /// Whether a sentinel `distance_px` below the viewport bottom is close
    /// enough to request the next page
    pub fn sentinel_in_range(&self, distance_px: i64) -> bool {
        distance_px <= self.lookahead_px as i64
    }

    /// Proximity trigger for the tail sentinel
    pub async fn on_sentinel(&mut self, distance_px: i64) -> usize {
        if !self.sentinel_in_range(distance_px) {
            return 0;
        }
        self.load_more().await
    }

    /// Mark everything read on the server, then locally
    pub async fn mark_all_read(&mut self) -> Result<()> {
        self.service.dismiss_all_notifications().await?;
        for notification in &mut self.items {
            notification.is_read = true;
        }
        Ok(())
    }

    /// Inbox lines, resolving event names against the cached event list
    pub fn describe_all(&self, known_events: &[Event]) -> Vec<String> {
        self.items.iter().map(|n| n.describe(known_events)).collect()
    }
}
