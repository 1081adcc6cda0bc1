use folio_core::client::NotebookClient;
use folio_core::SearchHit;

use crate::commands::common::{normalize_search_term, single_line_preview};
use crate::error::CliError;

pub async fn run_search(client: &NotebookClient, term: &str, as_json: bool) -> Result<(), CliError> {
    let term = normalize_search_term(term)?;
    let hits = client.search(&term).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else if hits.is_empty() {
        println!("No results for '{term}'");
    } else {
        for line in format_search_lines(&hits) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn format_search_lines(hits: &[SearchHit]) -> Vec<String> {
    hits.iter()
        .map(|hit| {
            let name = if hit.name.trim().is_empty() {
                "(untitled)".to_string()
            } else {
                single_line_preview(&hit.name, 30)
            };
            let snippet = single_line_preview(&hit.snippet, 60);
            if snippet.is_empty() {
                format!("{:<30}  {name}", hit.id)
            } else {
                format!("{:<30}  {name:<30}  {snippet}", hit.id)
            }
        })
        .collect()
}
