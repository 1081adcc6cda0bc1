//! Navigation session state and its reducer.
//!
//! All mutable navbar state lives in [`NavState`] and only changes through
//! [`NavState::apply`]. Transitions that need I/O return [`NavEffect`]s for the
//! caller to run; their results come back later as new events.

use crate::filter::{NoteListFilter, WindowPolicy};
use crate::models::{Note, NoteId, Ticket};

/// Something that happened in the UI or arrived from a collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    /// A fresh note list was pushed by the server.
    NotesReceived(Vec<Note>),
    /// The websocket connection went up or down.
    ConnectionChanged(bool),
    LoginSucceeded(Ticket),
    LoggedOut,
    /// The search box text changed.
    QueryChanged(String),
    /// The user clicked outside the search box.
    Dismissed,
    LoadMore,
    /// The router moved to a note page, or away from one.
    RouteChanged(Option<NoteId>),
    VersionLoaded(String),
    SearchSubmitted(String),
    RefreshRequested,
}

/// Work the reducer asks a collaborator to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEffect {
    RequestNoteList,
    FetchVersion,
}

#[derive(Debug, Clone, Default)]
pub struct NavState {
    pub filter: NoteListFilter,
    pub connected: bool,
    pub ticket: Option<Ticket>,
    pub server_version: Option<String>,
    pub active_note: Option<NoteId>,
    /// Last navigation target requested from the navbar.
    pub location: Option<String>,
}

impl NavState {
    /// Fresh state plus the effects a newly mounted navbar issues.
    #[must_use]
    pub fn init(policy: WindowPolicy) -> (Self, Vec<NavEffect>) {
        let state = Self {
            filter: NoteListFilter::with_policy(policy),
            ..Self::default()
        };
        (state, vec![NavEffect::FetchVersion, NavEffect::RequestNoteList])
    }

    pub fn apply(&mut self, event: NavEvent) -> Vec<NavEffect> {
        match event {
            NavEvent::NotesReceived(notes) => {
                self.filter.set_note_list(notes);
                Vec::new()
            }
            NavEvent::ConnectionChanged(connected) => {
                if self.connected != connected {
                    tracing::info!(connected, "connection status changed");
                }
                self.connected = connected;
                Vec::new()
            }
            NavEvent::LoginSucceeded(ticket) => {
                self.ticket = Some(ticket);
                vec![NavEffect::RequestNoteList]
            }
            NavEvent::LoggedOut => {
                self.ticket = None;
                self.location = Some("/".to_string());
                Vec::new()
            }
            NavEvent::QueryChanged(query) => {
                self.filter.set_query(query);
                Vec::new()
            }
            NavEvent::Dismissed => {
                self.filter.clear_query();
                Vec::new()
            }
            NavEvent::LoadMore => {
                self.filter.load_more();
                Vec::new()
            }
            NavEvent::RouteChanged(note_id) => {
                self.active_note = note_id;
                Vec::new()
            }
            NavEvent::VersionLoaded(version) => {
                self.server_version = Some(version);
                Vec::new()
            }
            NavEvent::SearchSubmitted(term) => {
                self.location = Some(search_location(&term));
                Vec::new()
            }
            NavEvent::RefreshRequested => vec![NavEffect::RequestNoteList],
        }
    }

    /// Whether `note_id` is the note currently open in the router.
    #[must_use]
    pub fn is_active(&self, note_id: &NoteId) -> bool {
        self.active_note.as_ref() == Some(note_id)
    }

    pub fn principal(&self) -> Option<&str> {
        self.ticket.as_ref().map(|ticket| ticket.principal.as_str())
    }
}

/// Route of the search results page for `term`.
#[must_use]
pub fn search_location(term: &str) -> String {
    format!("/search/{term}")
}
