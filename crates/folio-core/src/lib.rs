//! folio-core - Core library for Folio
//!
//! This crate contains the note models, the incremental note-list filter, the
//! navigation state reducer and its channel-driven store, and the REST client
//! used to talk to a notebook server. The CLI (and any other front end) only
//! renders what this crate produces.

pub mod browser;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod state;
pub mod store;
pub mod util;

pub use error::{Error, Result};
pub use filter::{NoteListFilter, WindowPolicy};
pub use models::{Note, NoteId, SearchHit, Ticket};
pub use state::{NavEffect, NavEvent, NavState};
pub use store::{NavBackend, NavHandle, NavSnapshot, NavStore};
