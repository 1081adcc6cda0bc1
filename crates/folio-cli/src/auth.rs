//! Login ticket persistence in the OS keychain, one entry per profile.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

#[cfg(not(test))]
use keyring::Entry;

use folio_core::Ticket;

use crate::error::CliError;

#[cfg(not(test))]
const KEYRING_SERVICE_NAME: &str = "folio-cli";

pub trait TicketPersistence {
    fn load_ticket(&self) -> Result<Option<Ticket>, CliError>;
    fn save_ticket(&self, ticket: &Ticket) -> Result<(), CliError>;
    fn clear_ticket(&self) -> Result<(), CliError>;
}

#[derive(Clone)]
pub struct TicketStore {
    username: String,
}

impl TicketStore {
    pub fn for_profile(profile_name: &str) -> Self {
        Self {
            username: format!("ticket:{profile_name}"),
        }
    }

    #[cfg(test)]
    fn test_store() -> &'static Mutex<HashMap<String, String>> {
        static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        STORE.get_or_init(|| Mutex::new(HashMap::new()))
    }

    #[cfg(not(test))]
    fn entry(&self) -> Result<Entry, CliError> {
        Entry::new(KEYRING_SERVICE_NAME, &self.username)
            .map_err(|error| CliError::TicketStore(error.to_string()))
    }
}

impl TicketPersistence for TicketStore {
    #[cfg(not(test))]
    fn load_ticket(&self) -> Result<Option<Ticket>, CliError> {
        let entry = self.entry()?;
        match entry.get_password() {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(CliError::TicketStore(error.to_string())),
        }
    }

    #[cfg(test)]
    fn load_ticket(&self) -> Result<Option<Ticket>, CliError> {
        let store = Self::test_store();
        let guard = store
            .lock()
            .map_err(|error| CliError::TicketStore(error.to_string()))?;
        if let Some(raw) = guard.get(&self.username) {
            Ok(Some(serde_json::from_str(raw)?))
        } else {
            Ok(None)
        }
    }

    #[cfg(not(test))]
    fn save_ticket(&self, ticket: &Ticket) -> Result<(), CliError> {
        let raw = serde_json::to_string(ticket)?;
        self.entry()?
            .set_password(&raw)
            .map_err(|error| CliError::TicketStore(error.to_string()))
    }

    #[cfg(test)]
    fn save_ticket(&self, ticket: &Ticket) -> Result<(), CliError> {
        let raw = serde_json::to_string(ticket)?;
        let store = Self::test_store();
        let mut guard = store
            .lock()
            .map_err(|error| CliError::TicketStore(error.to_string()))?;
        guard.insert(self.username.clone(), raw);
        Ok(())
    }

    #[cfg(not(test))]
    fn clear_ticket(&self) -> Result<(), CliError> {
        let entry = self.entry()?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(CliError::TicketStore(error.to_string())),
        }
    }

    #[cfg(test)]
    fn clear_ticket(&self) -> Result<(), CliError> {
        let store = Self::test_store();
        let mut guard = store
            .lock()
            .map_err(|error| CliError::TicketStore(error.to_string()))?;
        guard.remove(&self.username);
        Ok(())
    }
}
