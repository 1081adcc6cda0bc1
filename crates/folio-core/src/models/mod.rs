//! Data models for Folio

mod note;
mod ticket;

pub use note::{Note, NoteId};
pub use ticket::{SearchHit, Ticket};
