//! Notification model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use chrono::{DateTime, Utc};
use crate::models::event::Event;
use crate::models::user::deserialize_id;
use crate::utils::helpers::deserialize_flexible_date;

/// Label used when a notification cannot be tied to a known event
pub const UNKNOWN_EVENT_LABEL: &str = "Event";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    EventCreated,
    EventCancelled,
    ParticipantRegistered,
    ParticipantUnregistered,
    EventFinished,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    #[serde(default)]
    pub payload: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(deserialize_with = "deserialize_flexible_date")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub event_id: Option<String>,
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "deserialize_id")] String);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|w| w.0))
}

/// Body of `GET /notifications`
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationPage {
    #[serde(default)]
    pub data: Vec<Notification>,
}

/// Query for `GET /notifications`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationQuery {
    pub limit: u32,
    pub cursor_id_after: Option<i64>,
    pub is_read: Option<bool>,
}

impl NotificationQuery {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("limit", self.limit.to_string())];
        if let Some(cursor) = self.cursor_id_after {
            query.push(("cursorIdAfter", cursor.to_string()));
        }
        if let Some(is_read) = self.is_read {
            query.push(("isRead", is_read.to_string()));
        }
        query
    }
}

impl Notification {
    /// Decode the payload. It may be a JSON object, or a JSON string that
    /// itself contains the object; anything else yields an empty map.
    pub fn payload_fields(&self) -> Map<String, Value> {
        let Some(raw) = self.payload.as_deref() else {
            return Map::new();
        };

        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            Ok(Value::String(inner)) => match serde_json::from_str::<Value>(&inner) {
                Ok(Value::Object(map)) => map,
                _ => Map::new(),
            },
            _ => Map::new(),
        }
    }

    fn payload_text(&self, key: &str) -> Option<String> {
        match self.payload_fields().get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Event referenced by this notification, from the resolved field or the payload
    pub fn referenced_event_id(&self) -> Option<String> {
        self.event_id.clone().or_else(|| self.payload_text("eventId"))
    }

    /// Event name from the payload, then from the cached list, then a placeholder
    pub fn event_label(&self, known_events: &[Event]) -> String {
        if let Some(name) = self.payload_text("eventName") {
            return name;
        }

        self.referenced_event_id()
            .and_then(|id| known_events.iter().find(|e| e.id == id))
            .map(|e| e.name.clone())
            .unwrap_or_else(|| UNKNOWN_EVENT_LABEL.to_string())
    }

    /// One line of inbox text
    pub fn describe(&self, known_events: &[Event]) -> String {
        let event = self.event_label(known_events);
        match self.notification_type {
            NotificationType::EventCreated => format!("New event: {}", event),
            NotificationType::EventCancelled => match self.payload_text("reason") {
                Some(reason) => format!("{} was cancelled: {}", event, reason),
                None => format!("{} was cancelled", event),
            },
            NotificationType::ParticipantRegistered => {
                let who = self.payload_text("participantName").unwrap_or_else(|| "Someone".to_string());
                format!("{} joined {}", who, event)
            }
            NotificationType::ParticipantUnregistered => {
                let who = self.payload_text("participantName").unwrap_or_else(|| "Someone".to_string());
                format!("{} left {}", who, event)
            }
            NotificationType::EventFinished => format!("{} has finished", event),
        }
    }
}
