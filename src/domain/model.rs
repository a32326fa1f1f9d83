use crate::utils::error::{PageError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

const MAX_ID_BYTES: usize = 1500;

/// Identifier taken from the route; the same value drives both fetches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let reason = if raw.is_empty() {
            Some("identifier is empty")
        } else if raw.len() > MAX_ID_BYTES {
            Some("identifier is longer than 1500 bytes")
        } else if raw == "." || raw == ".." {
            Some("identifier cannot be '.' or '..'")
        } else if raw.len() >= 4 && raw.starts_with("__") && raw.ends_with("__") {
            Some("identifier cannot use the reserved __name__ form")
        } else if raw.contains('/') {
            Some("identifier cannot contain '/'")
        } else if raw.chars().any(char::is_control) {
            Some("identifier cannot contain control characters")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(PageError::InvalidEntityId {
                value: raw,
                reason: reason.to_string(),
            }),
            None => Ok(Self(raw)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EntityId {
    type Error = PageError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Entity {
    pub fn display_name(&self) -> &str {
        string_field(&self.fields, &["name", "title"]).unwrap_or(&self.id)
    }

    pub fn description(&self) -> Option<&str> {
        string_field(&self.fields, &["description"])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseCase {
    pub id: String,
    pub entity_id: String,
    pub fields: Map<String, Value>,
}

impl UseCase {
    pub fn title(&self) -> &str {
        string_field(&self.fields, &["title", "name"]).unwrap_or(&self.id)
    }

    pub fn summary(&self) -> Option<&str> {
        string_field(&self.fields, &["description", "summary"])
    }
}

/// Everything the rendering delegate receives for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityPage {
    pub entity: Entity,
    pub use_cases: Vec<UseCase>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectMetadata {
    pub name: String,
    pub bucket: String,
    #[serde(rename = "contentType")]
    pub content_type: Option<String>,
    #[serde(default, deserialize_with = "size_from_string")]
    pub size: Option<u64>,
    pub updated: Option<String>,
}

// Cloud Storage sends int64 values as JSON strings.
fn size_from_string<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => s.parse().ok(),
        Some(Value::Number(n)) => n.as_u64(),
        _ => None,
    })
}

fn string_field<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_str))
        .filter(|s| !s.trim().is_empty())
}
