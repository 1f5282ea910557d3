//! Event resource client
//!
//! The only code that knows the backend's event and participant wire
//! shapes. Every response is normalized here into the canonical models;
//! alternate field names (`currentParticipants`/`participantsCount`,
//! `name`/`firstName`, ...) never leave this module.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, info};
use crate::models::event::{Event, EventFilter, EventPage, EventPayload, EventStatus, FinishOptions};
use crate::models::user::{deserialize_id, User};
use crate::services::api::{segment, ApiClient};
use crate::utils::errors::{GeoHodError, Result};
use crate::utils::helpers::deserialize_flexible_date;
use crate::utils::logging::log_event_action;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    first_name: Option<String>,
    name: Option<String>,
    last_name: Option<String>,
    tg_username: Option<String>,
    username: Option<String>,
    tg_image_url: Option<String>,
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    name: Option<String>,
    title: Option<String>,
    description: Option<String>,
    #[serde(deserialize_with = "deserialize_flexible_date")]
    date: DateTime<Utc>,
    max_participants: Option<u32>,
    participants_count: Option<u32>,
    current_participants: Option<u32>,
    status: Option<EventStatus>,
    author: Option<RawUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEventPage {
    #[serde(default)]
    content: Vec<RawEvent>,
    #[serde(default)]
    total_elements: u64,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    size: u32,
    #[serde(default)]
    number: u32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawParticipants {
    Wrapped { participants: Vec<RawUser> },
    Bare(Vec<RawUser>),
}

#[derive(Debug, Deserialize)]
struct RawCreated {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
}

fn normalize_user(raw: RawUser) -> User {
    User {
        id: raw.id,
        first_name: raw.first_name.or(raw.name),
        last_name: raw.last_name,
        tg_username: raw.tg_username.or(raw.username),
        tg_image_url: raw.tg_image_url.or(raw.image_url),
    }
}

/// The single boundary between wire shape and canonical [`Event`]
fn normalize_event(raw: RawEvent) -> Result<Event> {
    let name = raw
        .name
        .or(raw.title)
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| GeoHodError::InvalidResponse(format!("event {} has no name", raw.id)))?;

    let max_participants = raw
        .max_participants
        .ok_or_else(|| GeoHodError::InvalidResponse(format!("event {} has no capacity", raw.id)))?;

    Ok(Event {
        id: raw.id,
        name,
        description: raw.description.filter(|d| !d.trim().is_empty()),
        date: raw.date,
        max_participants,
        participants_count: raw.current_participants.or(raw.participants_count).unwrap_or(0),
        status: raw.status.unwrap_or(EventStatus::Active),
        author: raw.author.map(normalize_user).unwrap_or_default(),
    })
}

/// Event and participant endpoints
#[derive(Clone, Debug)]
pub struct EventService {
    api: ApiClient,
}

impl EventService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /events`
    pub async fn list_events(&self, filter: &EventFilter) -> Result<EventPage> {
        let path = "events";
        let builder = self.api.request(Method::GET, path)?.query(&filter.to_query());
        let raw: RawEventPage = self.api.send_json(builder, path).await?;

        let content = raw
            .content
            .into_iter()
            .map(normalize_event)
            .collect::<Result<Vec<_>>>()?;

        debug!(count = content.len(), page = raw.number, "Fetched event page");

        Ok(EventPage {
            content,
            total_elements: raw.total_elements,
            total_pages: raw.total_pages,
            size: raw.size,
            number: raw.number,
        })
    }

    /// `GET /events/{id}`
    pub async fn get_event(&self, id: &str) -> Result<Event> {
        if id.trim().is_empty() {
            return Err(GeoHodError::Validation("Event id is required".to_string()));
        }
        let path = format!("events/{}", segment(id));
        let builder = self.api.request(Method::GET, &path)?;
        let raw: RawEvent = self.api.send_json(builder, &path).await?;
        normalize_event(raw)
    }

    /// `POST /events`, returns the new event id
    pub async fn create_event(&self, payload: &EventPayload) -> Result<String> {
        let path = "events";
        let builder = self.api.request(Method::POST, path)?.json(payload);
        let created: RawCreated = self.api.send_json(builder, path).await?;
        info!(event_id = %created.id, name = %payload.name, "Event created");
        Ok(created.id)
    }

    /// `PUT /events/{id}`
    pub async fn update_event(&self, id: &str, payload: &EventPayload) -> Result<Event> {
        let path = format!("events/{}", segment(id));
        let builder = self.api.request(Method::PUT, &path)?.json(payload);
        let raw: RawEvent = self.api.send_json(builder, &path).await?;
        log_event_action(id, "update", None, Some(&payload.name));
        normalize_event(raw)
    }

    /// `PATCH /events/{id}/cancel`
    pub async fn cancel_event(&self, id: &str) -> Result<()> {
        let path = format!("events/{}/cancel", segment(id));
        let builder = self.api.request(Method::PATCH, &path)?;
        self.api.send_empty(builder, &path).await?;
        log_event_action(id, "cancel", None, None);
        Ok(())
    }

    /// `POST /events/{id}/finish`
    pub async fn finish_event(&self, id: &str, options: &FinishOptions) -> Result<()> {
        options.validate()?;
        let path = format!("events/{}/finish", segment(id));
        let builder = self.api.request(Method::POST, &path)?.json(options);
        self.api.send_empty(builder, &path).await?;
        log_event_action(id, "finish", None, None);
        Ok(())
    }

    /// `POST /events/{id}/register`
    pub async fn register_for_event(&self, id: &str) -> Result<()> {
        let path = format!("events/{}/register", segment(id));
        let builder = self.api.request(Method::POST, &path)?;
        self.api.send_membership(builder, &path).await
    }

    /// `DELETE /events/{id}/unregister`
    pub async fn unregister_from_event(&self, id: &str) -> Result<()> {
        let path = format!("events/{}/unregister", segment(id));
        let builder = self.api.request(Method::DELETE, &path)?;
        self.api.send_membership(builder, &path).await
    }

    /// `GET /events/{id}/participants`
    pub async fn get_event_participants(&self, id: &str) -> Result<Vec<User>> {
        let path = format!("events/{}/participants", segment(id));
        let builder = self.api.request(Method::GET, &path)?;
        let raw: RawParticipants = self.api.send_json(builder, &path).await?;
        let users = match raw {
            RawParticipants::Wrapped { participants } => participants,
            RawParticipants::Bare(participants) => participants,
        };
        Ok(users.into_iter().map(normalize_user).collect())
    }

    /// `DELETE /events/{eventId}/participants/{participantId}`
    pub async fn remove_event_participant(&self, event_id: &str, participant_id: &str) -> Result<()> {
        let path = format!("events/{}/participants/{}", segment(event_id), segment(participant_id));
        let builder = self.api.request(Method::DELETE, &path)?;
        self.api.send_empty(builder, &path).await?;
        log_event_action(event_id, "remove_participant", None, Some(participant_id));
        Ok(())
    }
}
