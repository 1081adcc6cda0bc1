//! Folio CLI - browse, filter and search notebooks on a notebook server
//!
//! Thin front end over `folio-core`: every command resolves a profile, opens a
//! client (logging in when `--user`/`--password` are given) and prints text or
//! JSON.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;


use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::auth_cmd::{run_login, run_logout, run_status};
use crate::commands::browse::run_browse;
use crate::commands::common::{connect, login_pair};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::list::run_list;
use crate::commands::search::run_search;
use crate::commands::version::run_version;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let server = cli.server.clone();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::List { query, more, json } => {
            let session = connect(server, profile, &cli.credentials).await?;
            run_list(&session.client, &query, more, json).await?;
        }
        Commands::Search { term, json } => {
            let session = connect(server, profile, &cli.credentials).await?;
            run_search(&session.client, &term, json).await?;
        }
        Commands::Version => {
            let session = connect(server, profile, &cli.credentials).await?;
            run_version(&session.client).await?;
        }
        Commands::Login => {
            if login_pair(&cli.credentials)?.is_none() {
                return Err(CliError::MissingCredentials);
            }
            let session = connect(server, profile, &cli.credentials).await?;
            run_login(&session)?;
        }
        Commands::Logout => {
            let session = connect(server, profile, &cli.credentials).await?;
            run_logout(&session).await?;
        }
        Commands::Status => {
            let session = connect(server, profile, &cli.credentials).await?;
            run_status(&session).await?;
        }
        Commands::Browse { restart_on_query } => {
            let session = connect(server, profile, &cli.credentials).await?;
            run_browse(session, restart_on_query).await?;
        }
        Commands::Config { command } => run_config(command, server, profile)?,
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
