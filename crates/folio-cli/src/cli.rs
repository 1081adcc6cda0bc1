use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Browse, filter and search notebooks from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Notebook server URL (overrides FOLIO_SERVER_URL and the profile)
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// CLI profile name
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    #[command(flatten)]
    pub credentials: Credentials,
}

/// Optional credentials used to open an authenticated session first.
#[derive(Args, Clone, Debug, Default)]
pub struct Credentials {
    /// Log in as this user before running the command
    #[arg(long, global = true, value_name = "USER")]
    pub user: Option<String>,

    /// Password for --user
    #[arg(long, global = true, value_name = "PASSWORD")]
    pub password: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List notebooks, optionally filtered by name
    #[command(alias = "ls")]
    List {
        /// Case-insensitive name filter
        #[arg(short, long, default_value = "")]
        query: String,
        /// Extra pages of 10 notes to show
        #[arg(short, long, default_value = "0")]
        more: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Full-text search on the server
    Search {
        /// Search term
        term: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the server version
    Version,
    /// Log in with --user/--password and remember the ticket for this profile
    Login,
    /// Log out and forget the stored ticket
    Logout,
    /// Show the server and login status for this profile
    Status,
    /// Interactive navigator: type to filter, `:help` for commands
    Browse {
        /// Restart paging whenever the filter text changes
        #[arg(long)]
        restart_on_query: bool,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update a profile
    Init {
        /// Profile name to initialize (defaults to --profile, then "default")
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
        /// Notebook server URL
        #[arg(long, value_name = "URL")]
        server_url: String,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Print the resolved configuration
    Show,
}
