//! REST client for the notebook server.
//!
//! Every endpoint answers with a `{status, message, body}` envelope. Transport
//! failures surface as [`Error::Http`]; non-2xx answers become [`Error::Api`]
//! carrying the server's message when it sent one.

use std::sync::Arc;

use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::browser::{BrowserCapabilities, LogoutFallback, UserAgentCapabilities};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::{Note, SearchHit, Ticket};
use crate::store::NavBackend;
use crate::util::{compact_text, unix_timestamp_millis};

/// Result of a logout round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutOutcome {
    /// Set when the server refused the first attempt and a fallback ran.
    pub fallback: Option<LogoutFallback>,
}

#[derive(Clone)]
pub struct NotebookClient {
    server_url: String,
    api_base: String,
    client: Client,
    capabilities: Arc<dyn BrowserCapabilities>,
}

impl NotebookClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let capabilities = Arc::new(UserAgentCapabilities::new(config.user_agent()));
        Self::with_capabilities(config, capabilities)
    }

    pub fn with_capabilities(
        config: &ClientConfig,
        capabilities: Arc<dyn BrowserCapabilities>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent())
            .cookie_store(true)
            .build()?;

        Ok(Self {
            server_url: config.server_url()?,
            api_base: config.rest_api_base()?,
            client,
            capabilities,
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn rest_api_base(&self) -> &str {
        &self.api_base
    }

    /// Server version string.
    ///
    /// Older servers send the version as a plain string body; newer ones send
    /// an object with a `version` field.
    pub async fn version(&self) -> Result<String> {
        let body: Value = self
            .send(self.client.get(format!("{}/version", self.api_base)))
            .await?;
        match body {
            Value::String(version) => Ok(version),
            Value::Object(fields) => fields
                .get("version")
                .and_then(Value::as_str)
                .map(ToString::to_string)
                .ok_or_else(|| Error::Api("version response has no version field".to_string())),
            other => Err(Error::Api(format!(
                "unexpected version payload: {}",
                compact_text(&other.to_string())
            ))),
        }
    }

    /// All notebooks visible to the current session, in server order.
    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        let notes: Vec<Note> = self
            .send(self.client.get(format!("{}/notebook", self.api_base)))
            .await?;
        tracing::debug!(count = notes.len(), "fetched notebook list");
        Ok(notes)
    }

    /// Full-text search across paragraphs on the server.
    pub async fn search(&self, term: &str) -> Result<Vec<SearchHit>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(Error::InvalidInput("search term must not be empty".to_string()));
        }
        self.send(
            self.client
                .get(format!("{}/notebook/search", self.api_base))
                .query(&[("q", term)]),
        )
        .await
    }

    pub async fn login(&self, user_name: &str, password: &str) -> Result<Ticket> {
        if user_name.trim().is_empty() {
            return Err(Error::InvalidInput("user name is required".to_string()));
        }
        if password.is_empty() {
            return Err(Error::InvalidInput("password is required".to_string()));
        }

        let request = self
            .client
            .post(format!("{}/login", self.api_base))
            .form(&[("userName", user_name.trim()), ("password", password)]);
        let ticket: Ticket = self.send(request).await?;
        tracing::info!(principal = %ticket.principal, "logged in");
        Ok(ticket)
    }

    /// End the server session and make cached basic-auth credentials useless.
    ///
    /// The server usually rejects the first logout call once the session is
    /// gone. In that case a browser-specific fallback runs and logout is
    /// posted a second time, whose answer no longer matters.
    pub async fn logout(&self) -> Result<LogoutOutcome> {
        let logout_url = format!("{}/login/logout", self.api_base);
        let first = self.client.post(&logout_url).send().await?;
        if first.status().is_success() {
            tracing::info!("server confirmed logout");
            return Ok(LogoutOutcome { fallback: None });
        }
        tracing::debug!(status = %first.status(), "logout rejected, forcing credentials out");

        let (fallback, retry_url) = if let Some(version) = self.capabilities.legacy_ie_version() {
            tracing::debug!(version, "legacy IE detected");
            let fallback = if self.capabilities.clear_authentication_cache() {
                LogoutFallback::ClearAuthenticationCache
            } else {
                self.overwrite_cached_credentials().await;
                LogoutFallback::OverwriteCachedCredentials
            };
            (fallback, logout_url)
        } else {
            (
                LogoutFallback::CredentialBusting,
                credential_busting_url(&logout_url)?,
            )
        };

        match self.client.post(retry_url).send().await {
            Ok(response) => {
                tracing::debug!(status = %response.status(), "second logout attempt finished");
            }
            Err(error) => tracing::warn!("Second logout attempt failed: {}", error),
        }

        Ok(LogoutOutcome {
            fallback: Some(fallback),
        })
    }

    // The password changes on every call so no cache can replay it.
    async fn overwrite_cached_credentials(&self) {
        let request = self
            .client
            .head(&self.server_url)
            .basic_auth("logout", Some(unix_timestamp_millis().to_string()));
        if let Err(error) = request.send().await {
            tracing::warn!("Credential overwrite request failed: {}", error);
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.header(ACCEPT, "application/json").send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Api(parse_api_error(status, &body)));
        }
        let envelope = serde_json::from_str::<ApiEnvelope<T>>(&body)?;
        Ok(envelope.body)
    }
}

impl NavBackend for NotebookClient {
    async fn fetch_note_list(&self) -> Result<Vec<Note>> {
        self.list_notes().await
    }

    async fn fetch_version(&self) -> Result<String> {
        self.version().await
    }
}

/// Rewrite `url` so the request carries `false:false` basic credentials,
/// replacing whatever the client had cached for the host.
pub fn credential_busting_url(url: &str) -> Result<String> {
    let mut parsed =
        Url::parse(url).map_err(|error| Error::Config(format!("invalid logout URL: {error}")))?;
    parsed
        .set_username("false")
        .and_then(|()| parsed.set_password(Some("false")))
        .map_err(|()| Error::Config(format!("logout URL cannot carry credentials: {url}")))?;
    Ok(parsed.into())
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    body: T,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    status: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorEnvelope>(body) {
        if let Some(message) = payload
            .message
            .filter(|message| !message.trim().is_empty())
            .or(payload.status)
        {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", compact_text(trimmed), status.as_u16())
    }
}

#[cfg(test)]
mod tests;
