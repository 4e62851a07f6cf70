use std::cmp::Ordering;

use crate::core::note::{Note, NoteId};

/// Case-insensitive substring match on the title. An empty query matches
/// everything.
pub fn title_matches(title: &str, query: &str) -> bool {
    query.is_empty() || title.to_lowercase().contains(&query.to_lowercase())
}

/// Derive the display order: filter by the search query, then move pinned
/// notes to the front. The sort is stable, so both partitions keep the
/// collection order.
pub fn visible_notes<'a>(notes: &'a [Note], query: &str, pinned: &[NoteId]) -> Vec<&'a Note> {
    let mut visible: Vec<&Note> = notes
        .iter()
        .filter(|note| title_matches(&note.title, query))
        .collect();

    visible.sort_by(|a, b| {
        let a_pinned = pinned.contains(&a.id);
        let b_pinned = pinned.contains(&b.id);
        match (a_pinned, b_pinned) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    });

    visible
}
