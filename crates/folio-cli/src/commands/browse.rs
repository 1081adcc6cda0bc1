//! Interactive navigator backed by the navigation store.
//!
//! Every line read from stdin becomes a navigation event; every published
//! snapshot is re-rendered. A heartbeat checks the server so the connection
//! indicator follows reachability.

use std::time::Duration;

use folio_core::client::NotebookClient;
use folio_core::{NavEvent, NavHandle, NavSnapshot, NavState, NavStore, NoteId, WindowPolicy};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::auth_cmd::end_session;
use crate::commands::common::{format_note_lines, format_window_footer, Session};
use crate::commands::search::format_search_lines;
use crate::error::CliError;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

const HELP: &str = "\
Type to filter notes by name. Commands:
  :more           show 10 more notes
  :clear          clear the filter
  :open <id>      mark a note as open
  :close          clear the open note
  :search <term>  full-text search on the server
  :refresh        reload the note list
  :logout         end the session and forget the stored ticket
  :quit           exit";

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseInput {
    Event(NavEvent),
    Search(String),
    Logout,
    Help,
    Quit,
}

pub async fn run_browse(session: Session, restart_on_query: bool) -> Result<(), CliError> {
    let policy = if restart_on_query {
        WindowPolicy::RestartOnQueryChange
    } else {
        WindowPolicy::Independent
    };
    let (state, effects) = NavState::init(policy);
    let (handle, store_task) = NavStore::spawn(state, effects, session.client.clone());

    if let Some(ticket) = session.ticket.clone() {
        handle.dispatch(NavEvent::LoginSucceeded(ticket))?;
    }

    let renderer = tokio::spawn(render_loop(handle.subscribe()));
    let heartbeat = tokio::spawn(heartbeat_loop(handle.clone(), session.client.clone()));

    println!("{HELP}");
    let result = read_input(&handle, &session).await;

    heartbeat.abort();
    drop(handle);
    if let Err(error) = store_task.await {
        tracing::warn!("Navigation store task failed: {}", error);
    }
    if let Err(error) = renderer.await {
        tracing::warn!("Renderer task failed: {}", error);
    }
    result
}

async fn read_input(handle: &NavHandle, session: &Session) -> Result<(), CliError> {
    let client = &session.client;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_browse_input(&line) {
            BrowseInput::Quit => break,
            BrowseInput::Help => println!("{HELP}"),
            BrowseInput::Event(event) => handle.dispatch(event)?,
            BrowseInput::Logout => match end_session(session).await {
                Ok(_) => {
                    handle.dispatch(NavEvent::LoggedOut)?;
                    println!("Logout Success");
                }
                Err(error) => println!("Logout failed: {error}"),
            },
            BrowseInput::Search(term) => {
                handle.dispatch(NavEvent::SearchSubmitted(term.clone()))?;
                match client.search(&term).await {
                    Ok(hits) if hits.is_empty() => println!("No results for '{term}'"),
                    Ok(hits) => {
                        for line in format_search_lines(&hits) {
                            println!("{line}");
                        }
                    }
                    Err(error) => println!("Search failed: {error}"),
                }
            }
        }
    }
    Ok(())
}

async fn render_loop(mut snapshots: tokio::sync::watch::Receiver<NavSnapshot>) {
    while snapshots.changed().await.is_ok() {
        let snapshot = snapshots.borrow_and_update().clone();
        for line in render_snapshot(&snapshot) {
            println!("{line}");
        }
    }
}

async fn heartbeat_loop(handle: NavHandle, client: NotebookClient) {
    let mut interval = tokio::time::interval(HEARTBEAT_INTERVAL);
    loop {
        interval.tick().await;
        let reachable = client.version().await.is_ok();
        if handle.dispatch(NavEvent::ConnectionChanged(reachable)).is_err() {
            break;
        }
    }
}

pub fn parse_browse_input(line: &str) -> BrowseInput {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix(':') else {
        return BrowseInput::Event(NavEvent::QueryChanged(line.to_string()));
    };

    let (name, argument) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(name, rest)| (name, rest.trim()));

    match (name, argument) {
        ("q" | "quit" | "exit", _) => BrowseInput::Quit,
        ("more", _) => BrowseInput::Event(NavEvent::LoadMore),
        ("clear", _) => BrowseInput::Event(NavEvent::Dismissed),
        ("refresh", _) => BrowseInput::Event(NavEvent::RefreshRequested),
        ("logout", _) => BrowseInput::Logout,
        ("close", _) => BrowseInput::Event(NavEvent::RouteChanged(None)),
        ("open", id) if !id.is_empty() => {
            BrowseInput::Event(NavEvent::RouteChanged(Some(NoteId::from(id))))
        }
        ("search", term) if !term.is_empty() => BrowseInput::Search(term.to_string()),
        _ => BrowseInput::Help,
    }
}

pub fn render_snapshot(snapshot: &NavSnapshot) -> Vec<String> {
    let status = if snapshot.connected { "online" } else { "offline" };
    let user = snapshot.principal.as_deref().unwrap_or("anonymous");
    let version = snapshot.server_version.as_deref().unwrap_or("?");
    let mut lines = vec![format!("[{status}] {user} @ server {version}")];

    if let Some(location) = snapshot.location.as_deref() {
        lines.push(format!("-> {location}"));
    }
    if !snapshot.query.is_empty() {
        lines.push(format!("filter: {:?}", snapshot.query));
    }

    if !snapshot.notes_loaded {
        lines.push("Loading notes...".to_string());
    } else if snapshot.visible_notes.is_empty() {
        lines.push("No matching notes".to_string());
    } else {
        lines.extend(format_note_lines(
            &snapshot.visible_notes,
            snapshot.active_note.as_ref(),
        ));
        lines.push(format_window_footer(
            snapshot.visible_notes.len(),
            snapshot.filtered_count,
            snapshot.has_more,
            ":more to see more",
        ));
    }
    lines
}
