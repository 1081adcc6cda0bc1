use folio_core::client::NotebookClient;
use folio_core::NoteListFilter;
use serde::Serialize;

use crate::commands::common::{
    format_note_lines, format_window_footer, note_to_list_item, NoteListItem,
};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub query: String,
    pub window_size: usize,
    pub matched: usize,
    pub has_more: bool,
    pub notes: Vec<NoteListItem>,
}

pub async fn run_list(
    client: &NotebookClient,
    query: &str,
    more: usize,
    as_json: bool,
) -> Result<(), CliError> {
    let mut filter = NoteListFilter::new();
    filter.set_note_list(client.list_notes().await?);
    apply_list_options(&mut filter, query, more);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&list_output(&filter))?);
    } else {
        for line in render_list(&filter, more) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn apply_list_options(filter: &mut NoteListFilter, query: &str, more: usize) {
    filter.set_query(query);
    for _ in 0..more {
        filter.load_more();
    }
}

pub fn list_output(filter: &NoteListFilter) -> ListOutput {
    ListOutput {
        query: filter.query().to_string(),
        window_size: filter.window_size(),
        matched: filter.filtered_count(),
        has_more: filter.has_more(),
        notes: filter
            .visible_notes()
            .into_iter()
            .map(note_to_list_item)
            .collect(),
    }
}

pub fn render_list(filter: &NoteListFilter, more: usize) -> Vec<String> {
    let visible = filter.visible_notes();
    if visible.is_empty() {
        return vec!["No matching notes".to_string()];
    }

    let shown = visible.len();
    let mut lines = format_note_lines(visible, None);
    lines.push(String::new());
    lines.push(format_window_footer(
        shown,
        filter.filtered_count(),
        filter.has_more(),
        &format!("use --more {} to see more", more + 1),
    ));
    lines
}
