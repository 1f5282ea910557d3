//! Event model

use serde::{Deserialize, Serialize, Serializer};
use chrono::{DateTime, Utc};
use crate::models::user::User;
use crate::utils::errors::{GeoHodError, Result};
use crate::utils::helpers::to_iso_millis;

/// Smallest and largest group an organizer may open
pub const MIN_PARTICIPANTS: u32 = 1;
pub const MAX_PARTICIPANTS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Active,
    Canceled,
    Finished,
}

impl EventStatus {
    /// Canceled and finished events accept no further lifecycle changes
    pub fn is_closed(self) -> bool {
        !matches!(self, EventStatus::Active)
    }

    pub fn can_transition_to(self, next: EventStatus) -> bool {
        self == EventStatus::Active && next != EventStatus::Active
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Active => "ACTIVE",
            EventStatus::Canceled => "CANCELED",
            EventStatus::Finished => "FINISHED",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event in its canonical shape. Built only by the resource client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub max_participants: u32,
    pub participants_count: u32,
    pub status: EventStatus,
    pub author: User,
}

impl Event {
    pub fn is_full(&self) -> bool {
        self.participants_count >= self.max_participants
    }

    pub fn is_organized_by(&self, user_id: &str) -> bool {
        self.author.is(user_id)
    }

    /// Apply a status change, refusing to leave a closed state
    pub fn transition(&mut self, next: EventStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(GeoHodError::InvalidStateTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }
}

/// One page of `GET /events`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPage {
    pub content: Vec<Event>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    pub number: u32,
}

/// Body of `POST /events` and `PUT /events/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub name: String,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub date: DateTime<Utc>,
    pub max_participants: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn serialize_iso_millis<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_iso_millis(*date))
}

/// Query for `GET /events`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub iam_author: Option<bool>,
    pub iam_participant: Option<bool>,
    pub statuses: Vec<EventStatus>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl EventFilter {
    pub fn authored() -> Self {
        Self { iam_author: Some(true), ..Default::default() }
    }

    pub fn joined() -> Self {
        Self { iam_participant: Some(true), ..Default::default() }
    }

    pub fn with_statuses(mut self, statuses: &[EventStatus]) -> Self {
        self.statuses = statuses.to_vec();
        self
    }

    /// Query pairs in the order the backend documents them
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(iam_author) = self.iam_author {
            query.push(("iamAuthor", iam_author.to_string()));
        }
        if let Some(iam_participant) = self.iam_participant {
            query.push(("iamParticipant", iam_participant.to_string()));
        }
        for status in &self.statuses {
            query.push(("statuses", status.as_str().to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            query.push(("size", size.to_string()));
        }
        query
    }
}

/// Options collected by the organizer when finishing an event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishOptions {
    pub send_vote: bool,
    pub send_donation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donation: Option<String>,
}

impl FinishOptions {
    /// Donation text is mandatory exactly when donation info is sent
    pub fn validate(&self) -> Result<()> {
        let has_donation = self
            .donation
            .as_deref()
            .map(|d| !d.trim().is_empty())
            .unwrap_or(false);

        if self.send_donation && !has_donation {
            return Err(GeoHodError::Validation(
                "Donation details are required".to_string(),
            ));
        }
        Ok(())
    }

    /// Drop donation text that will not be sent
    pub fn normalized(mut self) -> Self {
        if !self.send_donation {
            self.donation = None;
        } else {
            self.donation = self.donation.map(|d| d.trim().to_string());
        }
        self
    }
}
