//! Adapter from the IOD entry list to the rows the tree actually shows.
//!
//! The visible row set is recomputed every frame from the full entry list,
//! the search text, the sort selection, and the favorites filter. Filtering
//! is an exact substring match on name or kind, case sensitive.

use dcmspec_explorer_core::{FavoritesStore, IodEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Kind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub column: SortColumn,
    pub reverse: bool,
}

impl Sort {
    /// Cycle the sort when a column header is clicked: first click sorts
    /// ascending, a second click on the same column flips the order.
    pub fn cycle(current: Option<Sort>, column: SortColumn) -> Sort {
        match current {
            Some(sort) if sort.column == column => Sort { column, reverse: !sort.reverse },
            _ => Sort { column, reverse: false },
        }
    }
}

/// Compute the rows to display, in display order.
pub fn visible_rows<'a>(
    entries: &'a [IodEntry],
    favorites: &FavoritesStore,
    search_text: &str,
    sort: Option<Sort>,
    favorites_only: bool,
) -> Vec<&'a IodEntry> {
    let search = search_text.trim();
    let mut rows: Vec<&IodEntry> = entries
        .iter()
        .filter(|entry| !favorites_only || favorites.is_favorite(&entry.table_id))
        .filter(|entry| {
            search.is_empty() || entry.name.contains(search) || entry.kind.as_str().contains(search)
        })
        .collect();

    if let Some(Sort { column, reverse }) = sort {
        match column {
            SortColumn::Name => {
                rows.sort_by_key(|entry| entry.name.to_lowercase());
            }
            SortColumn::Kind => {
                // Kind ties break on name.
                rows.sort_by_key(|entry| {
                    (entry.kind.as_str().to_lowercase(), entry.name.to_lowercase())
                });
            }
        }
        if reverse {
            rows.reverse();
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmspec_explorer_core::IodKind;
    use tempfile::tempdir;

    fn entry(name: &str, table_id: &str) -> IodEntry {
        IodEntry {
            name: name.to_string(),
            table_id: table_id.to_string(),
            table_url: String::new(),
            kind: IodKind::classify(table_id),
        }
    }

    fn sample_entries() -> Vec<IodEntry> {
        vec![
            entry("US Image", "table_A.6-1"),
            entry("CT Image", "table_A.3-1"),
            entry("Print Job", "table_B.26.2-1"),
        ]
    }

    #[test]
    fn search_matches_name_or_kind_case_sensitively() {
        let dir = tempdir().unwrap();
        let favorites = FavoritesStore::load(dir.path());
        let entries = sample_entries();

        let rows = visible_rows(&entries, &favorites, "Image", None, false);
        assert_eq!(rows.len(), 2);

        // Case sensitive: "image" matches nothing.
        let rows = visible_rows(&entries, &favorites, "image", None, false);
        assert!(rows.is_empty());

        // Kind text is searchable too.
        let rows = visible_rows(&entries, &favorites, "Normalized", None, false);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Print Job");
    }

    #[test]
    fn sort_by_name_and_reverse() {
        let dir = tempdir().unwrap();
        let favorites = FavoritesStore::load(dir.path());
        let entries = sample_entries();

        let sort = Some(Sort { column: SortColumn::Name, reverse: false });
        let rows = visible_rows(&entries, &favorites, "", sort, false);
        let names: Vec<_> = rows.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["CT Image", "Print Job", "US Image"]);

        let sort = Some(Sort { column: SortColumn::Name, reverse: true });
        let rows = visible_rows(&entries, &favorites, "", sort, false);
        let names: Vec<_> = rows.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["US Image", "Print Job", "CT Image"]);
    }

    #[test]
    fn sort_by_kind_breaks_ties_on_name() {
        let dir = tempdir().unwrap();
        let favorites = FavoritesStore::load(dir.path());
        let entries = sample_entries();

        let sort = Some(Sort { column: SortColumn::Kind, reverse: false });
        let rows = visible_rows(&entries, &favorites, "", sort, false);
        let names: Vec<_> = rows.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["CT Image", "US Image", "Print Job"]);
    }

    #[test]
    fn no_sort_keeps_source_order() {
        let dir = tempdir().unwrap();
        let favorites = FavoritesStore::load(dir.path());
        let entries = sample_entries();

        let rows = visible_rows(&entries, &favorites, "", None, false);
        let names: Vec<_> = rows.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["US Image", "CT Image", "Print Job"]);
    }

    #[test]
    fn favorites_filter_shows_exactly_the_favorites() {
        let dir = tempdir().unwrap();
        let mut favorites = FavoritesStore::load(dir.path());
        favorites.add("table_A.3-1").unwrap();
        favorites.add("table_B.26.2-1").unwrap();
        let entries = sample_entries();

        // Start-in-favorites view: visible rows are exactly the favorited
        // IODs.
        let rows = visible_rows(&entries, &favorites, "", None, true);
        let ids: Vec<_> = rows.iter().map(|e| e.table_id.as_str()).collect();
        assert_eq!(ids, vec!["table_A.3-1", "table_B.26.2-1"]);
    }

    #[test]
    fn sort_cycle_flips_on_second_click() {
        let first = Sort::cycle(None, SortColumn::Name);
        assert_eq!(first, Sort { column: SortColumn::Name, reverse: false });

        let second = Sort::cycle(Some(first), SortColumn::Name);
        assert!(second.reverse);

        let third = Sort::cycle(Some(second), SortColumn::Kind);
        assert_eq!(third, Sort { column: SortColumn::Kind, reverse: false });
    }
}
