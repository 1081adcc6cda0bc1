//! Channel-driven store around [`NavState`].
//!
//! Events are sent through a [`NavHandle`] and applied one at a time by a single
//! task, so the state never needs a lock. After every event that changes what
//! a renderer would show, a fresh [`NavSnapshot`] is published on a watch
//! channel. Effects run in their own tasks against a [`NavBackend`] and report
//! back as events. Only the newest note-list request may replace the list.

use std::future::Future;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::error::{Error, Result};
use crate::models::{Note, NoteId};
use crate::state::{NavEffect, NavEvent, NavState};

/// Collaborator that performs the I/O behind [`NavEffect`]s.
pub trait NavBackend: Clone + Send + Sync + 'static {
    fn fetch_note_list(&self) -> impl Future<Output = Result<Vec<Note>>> + Send;
    fn fetch_version(&self) -> impl Future<Output = Result<String>> + Send;
}

/// Read-only view of the navigation state handed to renderers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavSnapshot {
    pub visible_notes: Vec<Note>,
    pub notes_loaded: bool,
    pub query: String,
    pub window_size: usize,
    pub filtered_count: usize,
    pub has_more: bool,
    pub connected: bool,
    pub principal: Option<String>,
    pub server_version: Option<String>,
    pub active_note: Option<NoteId>,
    pub location: Option<String>,
}

impl NavSnapshot {
    #[must_use]
    pub fn from_state(state: &NavState) -> Self {
        Self {
            visible_notes: state
                .filter
                .visible_notes()
                .into_iter()
                .cloned()
                .collect(),
            notes_loaded: state.filter.notes().is_some(),
            query: state.filter.query().to_string(),
            window_size: state.filter.window_size(),
            filtered_count: state.filter.filtered_count(),
            has_more: state.filter.has_more(),
            connected: state.connected,
            principal: state.principal().map(ToString::to_string),
            server_version: state.server_version.clone(),
            active_note: state.active_note.clone(),
            location: state.location.clone(),
        }
    }

    pub fn is_active(&self, note_id: &NoteId) -> bool {
        self.active_note.as_ref() == Some(note_id)
    }
}

/// Sending side of a running store plus its snapshot feed.
#[derive(Clone)]
pub struct NavHandle {
    events: mpsc::UnboundedSender<StoreMessage>,
    snapshots: watch::Receiver<NavSnapshot>,
}

impl NavHandle {
    pub fn dispatch(&self, event: NavEvent) -> Result<()> {
        self.events
            .send(StoreMessage::Event(event))
            .map_err(|_| Error::StoreClosed)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> NavSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<NavSnapshot> {
        self.snapshots.clone()
    }
}

pub struct NavStore;

impl NavStore {
    /// Start the store task. `initial_effects` run immediately, typically the
    /// ones returned by [`NavState::init`].
    ///
    /// The task exits once every [`NavHandle`] has been dropped.
    pub fn spawn<B: NavBackend>(
        state: NavState,
        initial_effects: Vec<NavEffect>,
        backend: B,
    ) -> (NavHandle, JoinHandle<()>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(NavSnapshot::from_state(&state));

        let store = StoreLoop {
            state,
            feedback: events_tx.downgrade(),
            snapshots: snapshot_tx,
            backend,
            list_generation: 0,
        };
        let task = tokio::spawn(store.run(events_rx, initial_effects));
        let handle = NavHandle {
            events: events_tx,
            snapshots: snapshot_rx,
        };
        (handle, task)
    }
}

/// What travels on the store channel: UI events, and note lists that carry
/// the generation of the request that fetched them.
#[derive(Debug)]
enum StoreMessage {
    Event(NavEvent),
    NoteList { generation: u64, notes: Vec<Note> },
}

struct StoreLoop<B> {
    state: NavState,
    // Weak so in-flight requests never keep the store alive.
    feedback: mpsc::WeakUnboundedSender<StoreMessage>,
    snapshots: watch::Sender<NavSnapshot>,
    backend: B,
    /// Generation of the newest note list requested or pushed. Fetch results
    /// from older generations are stale and dropped.
    list_generation: u64,
}

impl<B: NavBackend> StoreLoop<B> {
    async fn run(
        mut self,
        mut messages: mpsc::UnboundedReceiver<StoreMessage>,
        initial_effects: Vec<NavEffect>,
    ) {
        self.run_effects(initial_effects);

        while let Some(message) = messages.recv().await {
            let event = match message {
                StoreMessage::Event(event) => {
                    if matches!(event, NavEvent::NotesReceived(_)) {
                        // A pushed list supersedes every fetch still in flight.
                        self.list_generation += 1;
                    }
                    event
                }
                StoreMessage::NoteList { generation, notes } => {
                    if generation != self.list_generation {
                        tracing::debug!(
                            generation,
                            latest = self.list_generation,
                            "dropping stale note list"
                        );
                        continue;
                    }
                    NavEvent::NotesReceived(notes)
                }
            };

            tracing::trace!(?event, "applying navigation event");
            let effects = self.state.apply(event);
            publish(&self.snapshots, &self.state);
            self.run_effects(effects);
        }
        tracing::debug!("navigation store stopped");
    }

    fn run_effects(&mut self, effects: Vec<NavEffect>) {
        for effect in effects {
            if effect == NavEffect::RequestNoteList {
                self.list_generation += 1;
            }
            run_effect(
                effect,
                self.list_generation,
                self.backend.clone(),
                self.feedback.clone(),
            );
        }
    }
}

/// Publish a snapshot of `state` unless it equals the current one. Returns
/// whether subscribers were notified.
fn publish(snapshots: &watch::Sender<NavSnapshot>, state: &NavState) -> bool {
    let next = NavSnapshot::from_state(state);
    snapshots.send_if_modified(|current| {
        if *current == next {
            false
        } else {
            *current = next;
            true
        }
    })
}

fn run_effect<B: NavBackend>(
    effect: NavEffect,
    list_generation: u64,
    backend: B,
    feedback: mpsc::WeakUnboundedSender<StoreMessage>,
) {
    tokio::spawn(async move {
        let message = match effect {
            NavEffect::RequestNoteList => match backend.fetch_note_list().await {
                Ok(notes) => StoreMessage::NoteList {
                    generation: list_generation,
                    notes,
                },
                Err(error) => {
                    tracing::warn!("Failed to load note list: {}", error);
                    return;
                }
            },
            NavEffect::FetchVersion => match backend.fetch_version().await {
                Ok(version) => StoreMessage::Event(NavEvent::VersionLoaded(version)),
                Err(error) => {
                    tracing::warn!("Failed to fetch server version: {}", error);
                    return;
                }
            },
        };

        if let Some(sender) = feedback.upgrade() {
            if sender.send(message).is_err() {
                tracing::debug!("store closed before effect result arrived");
            }
        }
    });
}
