//! Test data helpers
//!
//! JSON bodies shaped like the backend's responses, plus the fixed
//! instants and init data the tests run against.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use geohod::models::User;
use geohod::utils::clock::{FixedClock, SharedClock};

/// Telegram user 1001 ("Anna"), URL-encoded the way the host delivers it
pub const TEST_INIT_DATA: &str = "query_id=AAH1&user=%7B%22id%22%3A1001%2C%22first_name%22%3A%22Anna%22%2C%22username%22%3A%22anna%22%7D&auth_date=1700000000&hash=deadbeef";

pub const TEST_USER_ID: &str = "1001";
pub const ORGANIZER_ID: &str = "2002";

pub fn instant(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid test instant")
        .with_timezone(&Utc)
}

pub fn clock_at(rfc3339: &str) -> SharedClock {
    Arc::new(FixedClock(instant(rfc3339)))
}

pub fn test_user() -> User {
    User {
        id: TEST_USER_ID.to_string(),
        first_name: Some("Anna".to_string()),
        tg_username: Some("anna".to_string()),
        ..Default::default()
    }
}

pub fn organizer() -> User {
    User {
        id: ORGANIZER_ID.to_string(),
        first_name: Some("Oleg".to_string()),
        ..Default::default()
    }
}

pub fn user_json(id: i64, first_name: &str) -> Value {
    json!({
        "id": id,
        "firstName": first_name,
        "tgUsername": first_name.to_lowercase(),
    })
}

/// Event body as `GET /events/{id}` returns it
pub fn event_json(id: &str, date: &str, status: &str, max: u32, current: u32, author_id: i64) -> Value {
    json!({
        "id": id,
        "name": "Kayaking",
        "description": "Bring a towel",
        "date": date,
        "maxParticipants": max,
        "currentParticipants": current,
        "status": status,
        "author": user_json(author_id, "Oleg"),
    })
}

pub fn event_page_json(events: Vec<Value>) -> Value {
    let total = events.len();
    json!({
        "content": events,
        "totalElements": total,
        "totalPages": 1,
        "size": 20,
        "number": 0,
    })
}

pub fn notification_json(id: i64, kind: &str, payload: Option<&str>, is_read: bool) -> Value {
    json!({
        "id": id,
        "type": kind,
        "payload": payload,
        "isRead": is_read,
        "createdAt": "2025-06-01T10:00:00Z",
        "eventId": "e1",
    })
}

/// A page of `count` notifications with descending ids starting at `first_id`
pub fn notification_page(first_id: i64, count: usize) -> Value {
    let data: Vec<Value> = (0..count as i64)
        .map(|i| notification_json(first_id - i, "PARTICIPANT_REGISTERED", None, false))
        .collect();
    json!({ "data": data })
}
