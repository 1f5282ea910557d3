//! Telegram init data
//!
//! The host hands the mini app a URL-encoded `key=value&...` string. Its
//! `user` field is itself URL-encoded JSON. The raw string is forwarded to
//! the backend untouched; the parsed user identifies the acting user.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::form_urlencoded;
use crate::models::user::User;
use crate::utils::errors::{GeoHodError, Result};

/// The user object Telegram embeds in init data
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostUser {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

impl From<&HostUser> for User {
    fn from(host: &HostUser) -> Self {
        User {
            id: host.id.to_string(),
            first_name: Some(host.first_name.clone()),
            last_name: host.last_name.clone(),
            tg_username: host.username.clone(),
            tg_image_url: host.photo_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostSession {
    pub raw: String,
    pub user: Option<HostUser>,
    pub start_param: Option<String>,
    pub auth_date: Option<DateTime<Utc>>,
}

impl HostSession {
    pub fn parse(raw: &str) -> Result<Self> {
        let mut user = None;
        let mut start_param = None;
        let mut auth_date = None;

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "user" => {
                    let parsed: HostUser = serde_json::from_str(&value).map_err(|e| {
                        GeoHodError::Authentication(format!("malformed init data user: {}", e))
                    })?;
                    user = Some(parsed);
                }
                "start_param" if !value.is_empty() => start_param = Some(value.into_owned()),
                "auth_date" => {
                    auth_date = value
                        .parse::<i64>()
                        .ok()
                        .and_then(|secs| DateTime::from_timestamp(secs, 0));
                }
                _ => {}
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            user,
            start_param,
            auth_date,
        })
    }

    /// The acting user, required by every screen that checks roles
    pub fn current_user(&self) -> Result<User> {
        self.user
            .as_ref()
            .map(User::from)
            .ok_or_else(|| GeoHodError::Authentication("init data carries no user".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_init_data() {
        let raw = "query_id=AAH&user=%7B%22id%22%3A279058397%2C%22first_name%22%3A%22Vlad%22%2C%22username%22%3A%22vdkfrost%22%7D&auth_date=1700000000&start_param=registration_e1&hash=abc";
        let session = HostSession::parse(raw).unwrap();

        let user = session.current_user().unwrap();
        assert_eq!(user.id, "279058397");
        assert_eq!(user.tg_username.as_deref(), Some("vdkfrost"));
        assert_eq!(session.start_param.as_deref(), Some("registration_e1"));
        assert_eq!(session.auth_date.map(|d| d.timestamp()), Some(1_700_000_000));
        assert_eq!(session.raw, raw);
    }

    #[test]
    fn test_missing_user_is_authentication_error() {
        let session = HostSession::parse("auth_date=1").unwrap();
        assert!(matches!(session.current_user(), Err(GeoHodError::Authentication(_))));
        assert!(HostSession::parse("user=%7Bbroken").is_err());
    }
}
