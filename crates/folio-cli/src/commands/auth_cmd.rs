use folio_core::browser::LogoutFallback;
use folio_core::client::LogoutOutcome;

use crate::auth::{TicketPersistence, TicketStore};
use crate::commands::common::Session;
use crate::error::CliError;

pub fn run_login(session: &Session) -> Result<(), CliError> {
    let ticket = session
        .ticket
        .as_ref()
        .ok_or(CliError::MissingCredentials)?;
    TicketStore::for_profile(&session.profile_name).save_ticket(ticket)?;
    println!(
        "Logged in to {} as {} (profile '{}')",
        session.client.server_url(),
        ticket.principal,
        session.profile_name
    );
    Ok(())
}

pub async fn run_logout(session: &Session) -> Result<(), CliError> {
    end_session(session).await?;
    println!("Logout Success");
    Ok(())
}

/// Log out on the server and forget the profile's stored ticket.
pub async fn end_session(session: &Session) -> Result<LogoutOutcome, CliError> {
    let outcome = session.client.logout().await?;
    TicketStore::for_profile(&session.profile_name).clear_ticket()?;

    if let Some(fallback) = outcome.fallback {
        tracing::info!("Logout needed fallback: {}", describe_fallback(fallback));
    }
    Ok(outcome)
}

pub async fn run_status(session: &Session) -> Result<(), CliError> {
    println!("Profile: {}", session.profile_name);
    println!("Server:  {}", session.client.server_url());

    match session.client.version().await {
        Ok(version) => println!("Version: {version}"),
        Err(error) => println!("Version: unavailable ({error})"),
    }

    match &session.ticket {
        Some(ticket) => println!("User:    {}", ticket.principal),
        None => println!("User:    not logged in"),
    }
    Ok(())
}

pub const fn describe_fallback(fallback: LogoutFallback) -> &'static str {
    match fallback {
        LogoutFallback::ClearAuthenticationCache => "cleared the authentication cache",
        LogoutFallback::OverwriteCachedCredentials => "overwrote cached credentials",
        LogoutFallback::CredentialBusting => "retried with throwaway credentials",
    }
}
