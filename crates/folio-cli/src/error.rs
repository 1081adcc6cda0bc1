use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] folio_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Search term cannot be empty")]
    EmptySearchTerm,
    #[error("Both --user and --password are required to log in")]
    MissingCredentials,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Ticket storage error: {0}")]
    TicketStore(String),
}
