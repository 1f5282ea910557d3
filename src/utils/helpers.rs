//! Helper functions and utilities
//!
//! Calendar-day arithmetic in the user's offset, ISO formatting and
//! registration deep links.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Offset, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer};
use url::Url;
use crate::utils::errors::Result;

const REGISTRATION_PREFIX: &str = "registration_";

/// Build a `FixedOffset` from minutes east of UTC, falling back to UTC
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes * 60).unwrap_or_else(|| Utc.fix())
}

/// Calendar day of an instant as seen in the given offset
pub fn local_day(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

/// True if `instant` falls on a calendar day before the day of `now`
pub fn is_past_day(instant: DateTime<Utc>, now: DateTime<Utc>, offset: FixedOffset) -> bool {
    local_day(instant, offset) < local_day(now, offset)
}

/// True if both instants fall on the same calendar day
pub fn is_same_day(a: DateTime<Utc>, b: DateTime<Utc>, offset: FixedOffset) -> bool {
    local_day(a, offset) == local_day(b, offset)
}

/// ISO-8601 with millisecond precision and a `Z` suffix
pub fn to_iso_millis(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a backend timestamp: RFC 3339, or a naive timestamp meant as UTC
pub fn parse_flexible_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Serde adapter over [`parse_flexible_date`] for every backend date field
pub fn deserialize_flexible_date<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flexible_date(raw.trim()).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
}

/// Format an event start for display, e.g. `01.01.2099 09:00`
pub fn format_event_date(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format("%d.%m.%Y %H:%M").to_string()
}

/// Format a timestamp for user display (relative time)
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(timestamp);

    if diff < Duration::minutes(1) {
        "just now".to_string()
    } else if diff < Duration::hours(1) {
        format!("{} minutes ago", diff.num_minutes())
    } else if diff < Duration::days(1) {
        format!("{} hours ago", diff.num_hours())
    } else if diff < Duration::weeks(1) {
        format!("{} days ago", diff.num_days())
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}

/// Deep link that opens the mini app on the registration screen of an event
pub fn registration_link(bot_url: &str, event_id: &str) -> Result<String> {
    let mut url = Url::parse(bot_url)?;
    url.query_pairs_mut()
        .append_pair("startapp", &format!("{}{}", REGISTRATION_PREFIX, event_id));
    Ok(url.to_string())
}

/// Extract the event id from a `startapp` parameter
pub fn parse_start_param(param: &str) -> Option<&str> {
    param
        .strip_prefix(REGISTRATION_PREFIX)
        .filter(|id| !id.is_empty())
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
