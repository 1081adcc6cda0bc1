//! Client configuration.
//!
//! Provides a `ClientConfig` shared by the CLI and any other front end to
//! locate the notebook server and shape outgoing HTTP requests.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const REST_API_PATH: &str = "/api";

/// Where the notebook server lives and how to talk to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Read `FOLIO_SERVER_URL`, `FOLIO_TIMEOUT_SECS` and `FOLIO_USER_AGENT`.
    ///
    /// A timeout that is not a number is ignored with a warning.
    pub fn from_env() -> Self {
        let request_timeout_secs = normalize_text_option(std::env::var("FOLIO_TIMEOUT_SECS").ok())
            .and_then(|raw| match raw.parse::<u64>() {
                Ok(secs) => Some(secs),
                Err(error) => {
                    tracing::warn!("Ignoring FOLIO_TIMEOUT_SECS={raw:?}: {error}");
                    None
                }
            });

        Self {
            server_url: normalize_text_option(std::env::var("FOLIO_SERVER_URL").ok()),
            request_timeout_secs,
            user_agent: normalize_text_option(std::env::var("FOLIO_USER_AGENT").ok()),
        }
    }

    /// Fill unset fields from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            server_url: normalize_text_option(self.server_url)
                .or_else(|| normalize_text_option(fallback.server_url)),
            request_timeout_secs: self.request_timeout_secs.or(fallback.request_timeout_secs),
            user_agent: normalize_text_option(self.user_agent)
                .or_else(|| normalize_text_option(fallback.user_agent)),
        }
    }

    /// Normalized server root without a trailing slash.
    pub fn server_url(&self) -> Result<String> {
        let url = normalize_text_option(self.server_url.clone())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        normalize_server_url(&url)
    }

    /// Root of the REST API, e.g. `http://localhost:8080/api`.
    pub fn rest_api_base(&self) -> Result<String> {
        Ok(format!("{}{REST_API_PATH}", self.server_url()?))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn user_agent(&self) -> String {
        normalize_text_option(self.user_agent.clone())
            .unwrap_or_else(|| format!("folio/{}", env!("CARGO_PKG_VERSION")))
    }
}

/// Validate a server URL and strip trailing slashes (and a trailing `/api`).
pub fn normalize_server_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::Config("server URL must not be empty".to_string()));
    }
    if !is_http_url(trimmed) {
        return Err(Error::Config(format!(
            "server URL must include http:// or https:// (got {trimmed:?})"
        )));
    }
    let trimmed = trimmed.strip_suffix(REST_API_PATH).unwrap_or(trimmed);
    Ok(trimmed.trim_end_matches('/').to_string())
}
