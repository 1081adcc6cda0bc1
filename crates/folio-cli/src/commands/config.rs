use folio_core::config::ClientConfig;

use crate::cli::ConfigCommands;
use crate::config_profiles::{normalize_profile_name, resolve_client_config, CliProfilesConfig};
use crate::error::CliError;

pub fn run_config(
    command: ConfigCommands,
    global_server: Option<String>,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            name,
            server_url,
            no_activate,
        } => run_config_init(name.as_deref().or(global_profile), &server_url, no_activate),
        ConfigCommands::Show => run_config_show(global_server, global_profile),
    }
}

fn run_config_init(
    profile: Option<&str>,
    server_url: &str,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = normalize_profile_name(profile).unwrap_or_else(|| "default".to_string());

    config
        .profile_mut_or_default(&profile_name)
        .set_server_url(server_url)
        .map_err(CliError::Config)?;
    if !no_activate || config.active_profile.is_none() {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!("Saved profile '{profile_name}' to {}", path.display());
    Ok(())
}

fn run_config_show(
    global_server: Option<String>,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(global_profile);
    let resolved = resolve_client_config(
        global_server,
        ClientConfig::from_env(),
        config.profile(&profile_name),
    );

    println!("Profile:   {profile_name}");
    println!("Server:    {}", resolved.server_url()?);
    println!("REST API:  {}", resolved.rest_api_base()?);
    println!("Timeout:   {}s", resolved.request_timeout().as_secs());
    println!("UserAgent: {}", resolved.user_agent());
    Ok(())
}
