//! Keyword filtering of dataset rows.
//!
//! Matching is a case-sensitive, literal substring test against the text form of
//! every cell. The keyword is used exactly as typed: no trimming, no case
//! folding, no normalization. A row is kept if any one of its cells matches.

use crate::dataset::Row;

/// Returns the indices of the rows that match `keyword`, in original order.
///
/// An empty or absent keyword selects every row.
///
/// # Examples
///
/// ```rust
/// use nutrition_tui::dataset::Row;
/// use nutrition_tui::filter::filter_rows;
///
/// let rows: Vec<Row> = vec![
///     ["Egg", "70"].into_iter().collect(),
///     ["Rice", "130"].into_iter().collect(),
/// ];
///
/// assert_eq!(filter_rows(&rows, Some("Ri")), vec![1]);
/// assert_eq!(filter_rows(&rows, Some("")), vec![0, 1]);
/// assert_eq!(filter_rows(&rows, None), vec![0, 1]);
/// ```
pub fn filter_rows(rows: &[Row], keyword: Option<&str>) -> Vec<usize> {
    match keyword {
        Some(keyword) if !keyword.is_empty() => rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.contains(keyword))
            .map(|(index, _)| index)
            .collect(),
        _ => (0..rows.len()).collect(),
    }
}
