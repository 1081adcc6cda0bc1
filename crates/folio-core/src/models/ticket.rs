//! Login ticket and search result models

use std::fmt;

use serde::{Deserialize, Serialize};

use super::note::null_as_empty;

/// Credentials returned by a successful login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub principal: String,
    pub ticket: String,
    #[serde(default)]
    pub roles: String,
}

impl Ticket {
    /// Whether the server logged us in without real credentials.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.principal.is_empty() || self.principal == "anonymous"
    }
}

impl fmt::Debug for Ticket {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Ticket")
            .field("principal", &self.principal)
            .field("ticket", &"[REDACTED]")
            .field("roles", &self.roles)
            .finish()
    }
}

/// A single server-side search match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub snippet: String,
}
