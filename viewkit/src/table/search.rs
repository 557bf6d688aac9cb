//! Free-text search and local pagination

use super::column::Column;
use super::extract::search_text;
use super::value::Row;

/// Filters rows by a free-text query across all declared columns.
///
/// A row matches when any column's extracted text contains the trimmed,
/// case-folded query as a substring. This is a stable filter, not a
/// ranked search: matches keep their original order. An empty or
/// whitespace-only query returns every row unchanged.
pub fn search<'a>(rows: &'a [Row], columns: &[Column], query: &str) -> Vec<&'a Row> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }

    rows.iter()
        .filter(|row| {
            columns
                .iter()
                .any(|col| search_text(&col.value_of(row)).contains(&needle))
        })
        .collect()
}

/// Returns the slice of `rows` that makes up the requested page.
///
/// An out-of-range page index yields an empty slice, never an error.
pub fn paginate<T>(rows: &[T], page_index: usize, page_size: usize) -> &[T] {
    let start = page_index.saturating_mul(page_size).min(rows.len());
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

/// Number of pages needed for `total` rows, minimum 1 even when empty.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}
