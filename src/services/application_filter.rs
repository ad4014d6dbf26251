use crate::dto::application_dto::{ApplicationListQuery, SortDirection};
use crate::models::application::ApplicationRow;

fn matches_search(row: &ApplicationRow, needle: &str) -> bool {
    row.application.full_name.to_lowercase().contains(needle)
        || row
            .internship_title
            .as_deref()
            .map(|title| title.to_lowercase().contains(needle))
            .unwrap_or(false)
}

/// Filters and orders application rows for display.
///
/// Rows are sorted stably by `applied_at` ascending; descending order is that
/// sequence reversed, so rows applied at the same instant keep a fixed
/// relative order in both directions.
pub fn apply(rows: Vec<ApplicationRow>, query: &ApplicationListQuery) -> Vec<ApplicationRow> {
    let needle = query.search_term().map(str::to_lowercase);

    let mut filtered: Vec<ApplicationRow> = rows
        .into_iter()
        .filter(|row| query.status.matches(row.application.status))
        .filter(|row| match needle.as_deref() {
            Some(needle) => matches_search(row, needle),
            None => true,
        })
        .collect();

    filtered.sort_by_key(|row| row.application.applied_at);
    if query.sort == SortDirection::Desc {
        filtered.reverse();
    }
    filtered
}
