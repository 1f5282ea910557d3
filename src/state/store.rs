//! Shared event list
//!
//! One owner for the list screens' data. Readers get the cached list;
//! anything that changes an event calls [`EventListStore::invalidate`] and
//! the next screen fetches again.

use chrono::{DateTime, Utc};
use tracing::debug;
use crate::models::event::{Event, EventFilter};
use crate::services::EventService;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct EventListStore {
    service: EventService,
    filter: EventFilter,
    events: Vec<Event>,
    total_elements: u64,
    fetched_at: Option<DateTime<Utc>>,
}

impl EventListStore {
    pub fn new(service: EventService) -> Self {
        Self {
            service,
            filter: EventFilter::default(),
            events: Vec::new(),
            total_elements: 0,
            fetched_at: None,
        }
    }

    /// Replace the cached list with a fresh page for `filter`
    pub async fn fetch(&mut self, filter: EventFilter) -> Result<&[Event]> {
        let page = self.service.list_events(&filter).await?;
        debug!(count = page.content.len(), total = page.total_elements, "Event list refreshed");

        self.filter = filter;
        self.events = page.content;
        self.total_elements = page.total_elements;
        self.fetched_at = Some(Utc::now());
        Ok(&self.events)
    }

    /// Cached list if still valid, otherwise refetch with the last filter
    pub async fn get(&mut self) -> Result<&[Event]> {
        if self.fetched_at.is_none() {
            let filter = self.filter.clone();
            return self.fetch(filter).await;
        }
        Ok(&self.events)
    }

    pub fn invalidate(&mut self) {
        self.fetched_at = None;
    }

    pub fn is_stale(&self) -> bool {
        self.fetched_at.is_none()
    }

    /// Last fetched events, stale or not
    pub fn cached(&self) -> &[Event] {
        &self.events
    }

    pub fn find(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }
}
