//! Incremental note-list filtering
//!
//! `NoteListFilter` owns the latest note list pushed by the server together
//! with the live search query and the size of the rendered window. The window
//! starts at [`INITIAL_WINDOW_SIZE`] entries and grows by [`WINDOW_STEP`] each
//! time the user asks for more. Replacing the list always restarts the window.

use crate::models::Note;

/// Number of filtered notes rendered before any "load more".
pub const INITIAL_WINDOW_SIZE: usize = 10;
/// Growth applied by each "load more".
pub const WINDOW_STEP: usize = 10;

/// Whether a query change restarts pagination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WindowPolicy {
    /// Filtering and pagination are independent; typing a query keeps the
    /// current window size.
    #[default]
    Independent,
    /// Every query change resets the window to its initial size.
    RestartOnQueryChange,
}

/// Returns whether `note` should be listed for `query`.
///
/// An empty query matches everything. Otherwise the note name must contain the
/// query as a contiguous substring, compared after Unicode lowercasing.
#[must_use]
pub fn matches(note: &Note, query: &str) -> bool {
    name_matches(&note.name, &query.to_lowercase())
}

// `lowered_query` must already be lowercased.
fn name_matches(name: &str, lowered_query: &str) -> bool {
    lowered_query.is_empty() || name.to_lowercase().contains(lowered_query)
}

#[derive(Debug, Clone)]
pub struct NoteListFilter {
    notes: Option<Vec<Note>>,
    query: String,
    window_size: usize,
    policy: WindowPolicy,
}

impl Default for NoteListFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteListFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(WindowPolicy::default())
    }

    #[must_use]
    pub const fn with_policy(policy: WindowPolicy) -> Self {
        Self {
            notes: None,
            query: String::new(),
            window_size: INITIAL_WINDOW_SIZE,
            policy,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub const fn window_size(&self) -> usize {
        self.window_size
    }

    pub const fn policy(&self) -> WindowPolicy {
        self.policy
    }

    /// The current snapshot, or `None` until the first list arrives.
    pub fn notes(&self) -> Option<&[Note]> {
        self.notes.as_deref()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        if self.policy == WindowPolicy::RestartOnQueryChange {
            self.reset_window();
        }
    }

    /// Dismiss the filter box.
    pub fn clear_query(&mut self) {
        self.set_query(String::new());
    }

    /// Replace the snapshot wholesale and restart pagination.
    pub fn set_note_list(&mut self, notes: Vec<Note>) {
        tracing::debug!(count = notes.len(), "note list replaced");
        self.notes = Some(notes);
        self.reset_window();
    }

    /// No clamping here; `visible_notes` simply runs out of matches.
    pub fn load_more(&mut self) {
        self.window_size = self.window_size.saturating_add(WINDOW_STEP);
    }

    pub fn reset_window(&mut self) {
        self.window_size = INITIAL_WINDOW_SIZE;
    }

    /// First `window_size` matching notes in list order.
    #[must_use]
    pub fn visible_notes(&self) -> Vec<&Note> {
        self.filtered().take(self.window_size).collect()
    }

    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.filtered().count()
    }

    /// Whether matches exist beyond the current window.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.filtered().nth(self.window_size).is_some()
    }

    fn filtered(&self) -> impl Iterator<Item = &Note> + '_ {
        let query = self.query.to_lowercase();
        self.notes
            .iter()
            .flatten()
            .filter(move |note| name_matches(&note.name, &query))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn numbered(count: usize) -> Vec<Note> {
        (0..count)
            .map(|i| Note::new(format!("n{i}"), format!("Note {i}")))
            .collect()
    }

    fn ids(notes: &[&Note]) -> Vec<String> {
        notes.iter().map(|note| note.id.to_string()).collect()
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(matches(&Note::new("1", "Alpha"), ""));
        assert!(matches(&Note::new("2", ""), ""));
    }

    #[test]
    fn match_ignores_case() {
        assert!(matches(&Note::new("1", "MyNote"), "mynote"));
        assert!(matches(&Note::new("1", "mynote"), "MYNOTE"));
        assert!(matches(&Note::new("1", "ÉTÉ à Paris"), "été"));
    }

    #[test]
    fn match_requires_contiguous_substring() {
        assert!(!matches(&Note::new("1", "Alpha"), "apa"));
        assert!(!matches(&Note::new("1", "Alpha"), "zeta"));
    }

    #[test]
    fn visible_notes_agree_with_matches() {
        let notes = vec![
            Note::new("1", "ÉTÉ à Paris"),
            Note::new("2", "Summer"),
            Note::new("3", ""),
            Note::new("4", "été"),
        ];
        let mut filter = NoteListFilter::new();
        filter.set_note_list(notes.clone());

        for query in ["", "ÉTÉ", "été", "MMe", "x"] {
            filter.set_query(query);
            let expected: Vec<&Note> = notes.iter().filter(|note| matches(note, query)).collect();
            assert_eq!(filter.visible_notes(), expected, "query {query:?}");
        }
    }

    #[test]
    fn query_scenario_from_three_notes() {
        let mut filter = NoteListFilter::new();
        filter.set_note_list(vec![
            Note::new("1", "Alpha"),
            Note::new("2", "beta"),
            Note::new("3", "Gamma"),
        ]);

        filter.set_query("a");
        assert_eq!(ids(&filter.visible_notes()), vec!["1", "2", "3"]);

        filter.set_query("al");
        assert_eq!(ids(&filter.visible_notes()), vec!["1"]);
    }

    #[test]
    fn window_pages_through_notes_in_order() {
        let mut filter = NoteListFilter::new();
        filter.set_note_list(numbered(25));

        let first = filter.visible_notes();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].id.as_str(), "n0");
        assert_eq!(first[9].id.as_str(), "n9");
        assert!(filter.has_more());

        filter.load_more();
        let second = filter.visible_notes();
        assert_eq!(second.len(), 20);
        assert_eq!(second[19].id.as_str(), "n19");

        filter.load_more();
        assert_eq!(filter.visible_notes().len(), 25);
        assert!(!filter.has_more());
    }

    #[test]
    fn window_larger_than_matches_returns_all_matches() {
        let mut filter = NoteListFilter::new();
        filter.set_note_list(numbered(3));
        assert_eq!(filter.window_size(), 10);
        assert_eq!(filter.visible_notes().len(), 3);
        assert_eq!(filter.filtered_count(), 3);
    }

    #[test]
    fn no_list_yields_empty_window() {
        let filter = NoteListFilter::new();
        assert!(filter.notes().is_none());
        assert!(filter.visible_notes().is_empty());
        assert!(!filter.has_more());
    }

    #[test]
    fn new_list_resets_window() {
        let mut filter = NoteListFilter::new();
        filter.set_note_list(numbered(40));
        filter.load_more();
        filter.load_more();
        assert_eq!(filter.window_size(), 30);

        filter.set_note_list(numbered(40));
        assert_eq!(filter.window_size(), INITIAL_WINDOW_SIZE);
    }

    #[test]
    fn independent_policy_keeps_window_across_queries() {
        let mut filter = NoteListFilter::new();
        filter.set_note_list(numbered(40));
        filter.load_more();
        filter.set_query("note 1");
        assert_eq!(filter.window_size(), 20);
        // "Note 1" and "Note 10".."Note 19"
        assert_eq!(filter.visible_notes().len(), 11);
    }

    #[test]
    fn restart_policy_resets_window_on_query_change() {
        let mut filter = NoteListFilter::with_policy(WindowPolicy::RestartOnQueryChange);
        filter.set_note_list(numbered(40));
        filter.load_more();
        filter.set_query("note 1");
        assert_eq!(filter.window_size(), INITIAL_WINDOW_SIZE);
        assert_eq!(filter.visible_notes().len(), 10);
    }

    #[test]
    fn clear_query_removes_filter() {
        let mut filter = NoteListFilter::new();
        filter.set_note_list(numbered(5));
        filter.set_query("note 3");
        assert_eq!(filter.filtered_count(), 1);
        filter.clear_query();
        assert_eq!(filter.query(), "");
        assert_eq!(filter.filtered_count(), 5);
    }

    proptest! {
        #[test]
        fn load_more_grows_by_step(k in 0usize..200) {
            let mut filter = NoteListFilter::new();
            for _ in 0..k {
                filter.load_more();
            }
            prop_assert_eq!(filter.window_size(), INITIAL_WINDOW_SIZE + WINDOW_STEP * k);
        }

        #[test]
        fn reset_always_restores_initial_size(k in 0usize..50) {
            let mut filter = NoteListFilter::new();
            for _ in 0..k {
                filter.load_more();
            }
            filter.reset_window();
            prop_assert_eq!(filter.window_size(), INITIAL_WINDOW_SIZE);
        }

        #[test]
        fn any_case_variant_substring_matches(
            name in "[a-zA-Z ]{1,24}",
            start in 0usize..24,
            len in 1usize..24,
            upper in any::<bool>(),
        ) {
            let start = start.min(name.len() - 1);
            let end = (start + len).min(name.len());
            let slice = &name[start..end];
            let query = if upper { slice.to_uppercase() } else { slice.to_lowercase() };
            prop_assert!(matches(&Note::new("id", name.clone()), &query));
        }

        #[test]
        fn digits_never_match_alphabetic_names(name in "[a-zA-Z]{0,24}", query in "[0-9]{1,4}") {
            prop_assert!(!matches(&Note::new("id", name), &query));
        }

        #[test]
        fn visible_notes_are_an_ordered_prefix_of_matches(
            names in proptest::collection::vec("[a-c]{1,3}", 0..60),
            query in "[a-c]{0,2}",
            pages in 0usize..5,
        ) {
            let notes: Vec<Note> = names
                .iter()
                .enumerate()
                .map(|(i, name)| Note::new(i.to_string(), name.clone()))
                .collect();
            let expected: Vec<String> = notes
                .iter()
                .filter(|note| matches(note, &query))
                .map(|note| note.id.to_string())
                .collect();

            let mut filter = NoteListFilter::new();
            filter.set_note_list(notes);
            filter.set_query(query);
            for _ in 0..pages {
                filter.load_more();
            }

            let visible = ids(&filter.visible_notes());
            let window = INITIAL_WINDOW_SIZE + WINDOW_STEP * pages;
            prop_assert_eq!(visible.len(), expected.len().min(window));
            prop_assert_eq!(&visible[..], &expected[..visible.len()]);
        }
    }
}
