//! Note model

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Server-assigned note identifier (opaque string, e.g. `2A94M5J1Z`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A notebook entry as listed by the server.
///
/// Only `id` and `name` are interpreted. Anything else the server sends is
/// carried along untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Display name; a missing or `null` name is read as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Opaque server fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Note {
    /// Create a note with the given id and name
    pub fn new(id: impl Into<NoteId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Name shown in the navigation list, falling back to `Note <id>` for
    /// unnamed notes.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.name.trim().is_empty() {
            format!("Note {}", self.id)
        } else {
            self.name.clone()
        }
    }
}

/// Read an optional string field, treating `null` like a missing value.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
