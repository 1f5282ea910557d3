//! User model

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub tg_username: Option<String>,
    #[serde(default)]
    pub tg_image_url: Option<String>,
}

impl User {
    /// Identity check tolerant of numeric host ids against string backend ids
    pub fn is(&self, other_id: &str) -> bool {
        same_id(&self.id, other_id)
    }

    /// Name shown in rosters and notifications
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if !full.is_empty() {
            full
        } else if let Some(username) = self.tg_username.as_deref().filter(|u| !u.is_empty()) {
            format!("@{}", username)
        } else {
            "Participant".to_string()
        }
    }
}

/// Compare two ids after coercing both sides to trimmed strings
pub fn same_id(a: &str, b: &str) -> bool {
    !a.trim().is_empty() && a.trim() == b.trim()
}

/// Accept an id sent either as a JSON string or a JSON number
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
