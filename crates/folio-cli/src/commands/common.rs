use folio_core::client::NotebookClient;
use folio_core::config::ClientConfig;
use folio_core::{Note, NoteId, Ticket};
use serde::Serialize;

use crate::auth::{TicketPersistence, TicketStore};
use crate::cli::Credentials;
use crate::config_profiles::{resolve_client_config, CliProfilesConfig};
use crate::error::CliError;

/// A client bound to a resolved profile, logged in when credentials were given.
pub struct Session {
    pub profile_name: String,
    pub client: NotebookClient,
    pub ticket: Option<Ticket>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NoteListItem {
    pub id: String,
    pub name: String,
    pub display_name: String,
}

pub async fn connect(
    server: Option<String>,
    profile: Option<&str>,
    credentials: &Credentials,
) -> Result<Session, CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile);
    let client_config = resolve_client_config(
        server,
        ClientConfig::from_env(),
        config.profile(&profile_name),
    );
    let client = NotebookClient::new(&client_config)?;
    tracing::debug!(profile = %profile_name, server = client.server_url(), "resolved server");

    let login = match login_pair(credentials)? {
        Some((user, password)) => Some(client.login(user, password).await?),
        None => None,
    };
    let ticket = session_ticket(login, &TicketStore::for_profile(&profile_name))?;

    Ok(Session {
        profile_name,
        client,
        ticket,
    })
}

/// A fresh login wins; otherwise the ticket saved by `folio login` for this
/// profile, if any.
pub fn session_ticket(
    login: Option<Ticket>,
    stored: &impl TicketPersistence,
) -> Result<Option<Ticket>, CliError> {
    if login.is_some() {
        return Ok(login);
    }
    let ticket = stored.load_ticket()?;
    if let Some(ticket) = &ticket {
        tracing::debug!(principal = %ticket.principal, "using stored ticket");
    }
    Ok(ticket)
}

/// Credentials must be given as a pair or not at all.
pub fn login_pair(credentials: &Credentials) -> Result<Option<(&str, &str)>, CliError> {
    match (credentials.user.as_deref(), credentials.password.as_deref()) {
        (Some(user), Some(password)) => Ok(Some((user, password))),
        (None, None) => Ok(None),
        _ => Err(CliError::MissingCredentials),
    }
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    NoteListItem {
        id: note.id.to_string(),
        name: note.name.clone(),
        display_name: note.display_name(),
    }
}

pub fn format_note_lines<'a>(
    notes: impl IntoIterator<Item = &'a Note>,
    active: Option<&NoteId>,
) -> Vec<String> {
    notes
        .into_iter()
        .map(|note| {
            let marker = if active == Some(&note.id) { '*' } else { ' ' };
            let id = note.id.to_string();
            format!("{marker} {id:<12}  {}", note.display_name())
        })
        .collect()
}

/// `more_hint` tells the user how to grow the window and is only shown when
/// matches remain hidden.
pub fn format_window_footer(shown: usize, matched: usize, has_more: bool, more_hint: &str) -> String {
    let noun = if matched == 1 { "note" } else { "notes" };
    if has_more {
        format!("Showing {shown} of {matched} matching {noun} ({more_hint})")
    } else {
        format!("Showing {shown} of {matched} matching {noun}")
    }
}

pub fn normalize_search_term(term: &str) -> Result<String, CliError> {
    let term = term.trim();
    if term.is_empty() {
        Err(CliError::EmptySearchTerm)
    } else {
        Ok(term.to_string())
    }
}

/// First line of `text`, whitespace collapsed and cut to `max_chars`.
pub fn single_line_preview(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().find(|line| !line.trim().is_empty()).unwrap_or("");
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}
