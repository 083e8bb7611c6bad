//! Schema-less sheet representation.

use serde::{Deserialize, Serialize};

/// One named two-dimensional data set from the workbook.
///
/// All cell contents are kept as text; numeric interpretation happens only at
/// aggregation time. No invariants are enforced over row or column contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name as it appears in the workbook.
    pub name: String,
    /// Column headers (first row of the sheet).
    pub headers: Vec<String>,
    /// Data rows as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Create a new sheet.
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of data rows (excluding the header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find a column by header name, exact match first, then
    /// case-insensitive with surrounding whitespace ignored.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name).or_else(|| {
            self.headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
        })
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column).map(|s| s.as_str()))
    }

    /// Indices of the rows whose cell in `column` contains `needle`
    /// (case-insensitive substring containment, tolerant of naming variation).
    pub fn rows_where_contains(&self, column: usize, needle: &str) -> Vec<usize> {
        let needle = needle.to_lowercase();
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                row.get(column)
                    .is_some_and(|cell| cell.to_lowercase().contains(&needle))
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Sum the numeric values of `column` over the given row indices.
    ///
    /// Returns the total and how many cells parsed as numbers; blank and
    /// non-numeric cells are skipped.
    pub fn sum_column(&self, column: usize, rows: &[usize]) -> (f64, usize) {
        let mut total = 0.0;
        let mut counted = 0;
        for &i in rows {
            if let Some(value) = self
                .rows
                .get(i)
                .and_then(|r| r.get(column))
                .and_then(|cell| parse_number(cell))
            {
                total += value;
                counted += 1;
            }
        }
        (total, counted)
    }
}

/// Parse a cell as a number, tolerating thousands separators and currency
/// symbols as spreadsheet exports commonly carry them.
pub fn parse_number(cell: &str) -> Option<f64> {
    let cleaned: String = cell
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '¥' | '$' | '€' | '£') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sheet() -> Sheet {
        Sheet::new(
            "TotalSales",
            vec!["Totalname".into(), "2024".into(), "2025".into()],
            vec![
                vec!["OseltamivirX".into(), "800".into(), "600".into()],
                vec!["OseltamivirX Plus".into(), "120".into(), "400".into()],
                vec!["Cetirizine".into(), "90".into(), "55".into()],
            ],
        )
    }

    #[test]
    fn test_column_index_exact_and_case_insensitive() {
        let sheet = sample_sheet();
        assert_eq!(sheet.column_index("Totalname"), Some(0));
        assert_eq!(sheet.column_index("totalname"), Some(0));
        assert_eq!(sheet.column_index(" 2025 "), Some(2));
        assert_eq!(sheet.column_index("Channel"), None);
    }

    #[test]
    fn test_rows_where_contains_is_substring_match() {
        let sheet = sample_sheet();
        // Both product name variants match the shared stem.
        assert_eq!(sheet.rows_where_contains(0, "oseltamivir"), vec![0, 1]);
        assert_eq!(sheet.rows_where_contains(0, "Cetirizine"), vec![2]);
        assert!(sheet.rows_where_contains(0, "Ibuprofen").is_empty());
    }

    #[test]
    fn test_sum_column_aggregates_matches() {
        let sheet = sample_sheet();
        let rows = sheet.rows_where_contains(0, "Oseltamivir");
        let (total, counted) = sheet.sum_column(2, &rows);
        assert_eq!(total, 1000.0);
        assert_eq!(counted, 2);
    }

    #[test]
    fn test_parse_number_tolerates_formatting() {
        assert_eq!(parse_number("1000"), Some(1000.0));
        assert_eq!(parse_number(" 1,000 "), Some(1000.0));
        assert_eq!(parse_number("¥12.5"), Some(12.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("n/a"), None);
    }
}
