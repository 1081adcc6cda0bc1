use folio_core::client::NotebookClient;

use crate::error::CliError;

pub async fn run_version(client: &NotebookClient) -> Result<(), CliError> {
    let version = client.version().await?;
    println!("{} {version}", client.server_url());
    Ok(())
}
