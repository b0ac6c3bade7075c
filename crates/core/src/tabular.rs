//! Orientation-aware access to a 2-D grid of string cells.
//!
//! Every lookup that depends on which axis carries the header goes through
//! [`TabularAccessor`]; nothing else in the workspace indexes a grid directly.

use serde::{Deserialize, Serialize};

/// Row-major grid of cells as returned by a spreadsheet provider.
pub type Grid = Vec<Vec<String>>;

/// Axis along which header labels run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderOrientation {
    /// Row 0 holds the header, row 1 a preview record.
    #[default]
    Horizontal,
    /// Column 0 holds the header, column 1 a preview record.
    Vertical,
}

/// Borrowed view of a grid under a header orientation.
#[derive(Debug, Clone, Copy)]
pub struct TabularAccessor<'g> {
    grid: &'g [Vec<String>],
    orientation: HeaderOrientation,
}

impl<'g> TabularAccessor<'g> {
    /// Wraps `grid` with the given orientation.
    pub fn new(grid: &'g [Vec<String>], orientation: HeaderOrientation) -> Self {
        Self { grid, orientation }
    }

    /// Orientation used for every lookup.
    pub fn orientation(&self) -> HeaderOrientation {
        self.orientation
    }

    /// Record `index` along the header axis.
    ///
    /// Horizontal grids return `grid[index]`; vertical grids return element
    /// `index` of every row. Out-of-range indexes yield an empty sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use sheetmail_core::tabular::{HeaderOrientation, TabularAccessor};
    ///
    /// let grid = vec![
    ///     vec!["id".to_string(), "1".to_string()],
    ///     vec!["name".to_string(), "Ada".to_string()],
    /// ];
    /// let accessor = TabularAccessor::new(&grid, HeaderOrientation::Vertical);
    /// assert_eq!(accessor.header_row(), vec!["id", "name"]);
    /// assert_eq!(accessor.row(1), vec!["1", "Ada"]);
    /// ```
    pub fn row(&self, index: usize) -> Vec<&'g str> {
        match self.orientation {
            HeaderOrientation::Horizontal => self.stored_row(index),
            HeaderOrientation::Vertical => self.stored_column(index),
        }
    }

    /// Dual of [`row`](Self::row): the full run of values for column `index`.
    ///
    /// This is the axis searched for a lookup value.
    pub fn cross_axis(&self, index: usize) -> Vec<&'g str> {
        match self.orientation {
            HeaderOrientation::Horizontal => self.stored_column(index),
            HeaderOrientation::Vertical => self.stored_row(index),
        }
    }

    /// Position of the first record whose cell `index` on the cross axis is
    /// exactly `value`.
    ///
    /// Cells missing from short rows never match, not even an empty `value`.
    pub fn find_record(&self, index: usize, value: &str) -> Option<usize> {
        match self.orientation {
            HeaderOrientation::Horizontal => self
                .grid
                .iter()
                .position(|row| row.get(index).is_some_and(|cell| cell == value)),
            HeaderOrientation::Vertical => index_of(&self.stored_row(index), value),
        }
    }

    /// Header labels; empty for an empty grid.
    pub fn header_row(&self) -> Vec<&'g str> {
        self.row(0)
    }

    /// First data record, used to preview sample values.
    pub fn preview_row(&self) -> Vec<&'g str> {
        self.row(1)
    }

    fn stored_row(&self, index: usize) -> Vec<&'g str> {
        self.grid
            .get(index)
            .map(|row| row.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    // Providers trim trailing empty cells, so short rows read as "" to keep
    // positions aligned with the other rows.
    fn stored_column(&self, index: usize) -> Vec<&'g str> {
        if !self.grid.iter().any(|row| index < row.len()) {
            return Vec::new();
        }
        self.grid
            .iter()
            .map(|row| row.get(index).map(String::as_str).unwrap_or(""))
            .collect()
    }
}

/// Position of the first cell exactly equal to `needle`.
///
/// Comparison is case-sensitive with no trimming: `"name "` does not match
/// `"name"`.
pub fn index_of(haystack: &[&str], needle: &str) -> Option<usize> {
    haystack.iter().position(|cell| *cell == needle)
}

/// Cell at `index`, or `""` when the record is shorter.
pub fn cell<'a>(record: &[&'a str], index: usize) -> &'a str {
    record.get(index).copied().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Grid {
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn horizontal_rows_and_columns() {
        let g = grid(&[&["id", "name"], &["1", "Ada"], &["2", "Grace"]]);
        let accessor = TabularAccessor::new(&g, HeaderOrientation::Horizontal);
        assert_eq!(accessor.header_row(), vec!["id", "name"]);
        assert_eq!(accessor.preview_row(), vec!["1", "Ada"]);
        assert_eq!(accessor.cross_axis(1), vec!["name", "Ada", "Grace"]);
    }

    #[test]
    fn vertical_transposes_access() {
        let g = grid(&[&["id", "1", "2"], &["name", "Ada", "Grace"]]);
        let accessor = TabularAccessor::new(&g, HeaderOrientation::Vertical);
        assert_eq!(accessor.header_row(), vec!["id", "name"]);
        assert_eq!(accessor.row(2), vec!["2", "Grace"]);
        assert_eq!(accessor.cross_axis(0), vec!["id", "1", "2"]);
    }

    #[test]
    fn orientation_duality() {
        let grids = [
            grid(&[&["id", "name"], &["1", "Ada"]]),
            grid(&[&["a", "b", "c"], &["1"], &["x", "y"]]),
            grid(&[]),
        ];
        for g in &grids {
            let horizontal = TabularAccessor::new(g, HeaderOrientation::Horizontal);
            let vertical = TabularAccessor::new(g, HeaderOrientation::Vertical);
            for i in 0..4 {
                assert_eq!(horizontal.row(i), vertical.cross_axis(i), "index {i}");
                assert_eq!(vertical.row(i), horizontal.cross_axis(i), "index {i}");
            }
        }
    }

    #[test]
    fn empty_grid_has_empty_header() {
        let g: Grid = Vec::new();
        for orientation in [HeaderOrientation::Horizontal, HeaderOrientation::Vertical] {
            let accessor = TabularAccessor::new(&g, orientation);
            assert!(accessor.header_row().is_empty());
            assert!(accessor.preview_row().is_empty());
        }
    }

    #[test]
    fn out_of_range_is_empty() {
        let g = grid(&[&["id", "name"], &["1", "Ada"]]);
        let horizontal = TabularAccessor::new(&g, HeaderOrientation::Horizontal);
        assert!(horizontal.row(5).is_empty());
        assert!(horizontal.cross_axis(5).is_empty());
        let vertical = TabularAccessor::new(&g, HeaderOrientation::Vertical);
        assert!(vertical.row(2).is_empty());
    }

    #[test]
    fn ragged_columns_pad_with_empty_cells() {
        let g = grid(&[&["id", "name", "note"], &["1", "Ada"], &["2", "Grace", "hi"]]);
        let accessor = TabularAccessor::new(&g, HeaderOrientation::Horizontal);
        assert_eq!(accessor.cross_axis(2), vec!["note", "", "hi"]);
    }

    #[test]
    fn find_record_skips_missing_cells() {
        let g = grid(&[&["id", "name", "note"], &["1", "Ada"], &["2", "Grace", ""]]);
        let horizontal = TabularAccessor::new(&g, HeaderOrientation::Horizontal);
        assert_eq!(horizontal.find_record(2, ""), Some(2));
        assert_eq!(horizontal.find_record(0, "2"), Some(2));
        assert_eq!(horizontal.find_record(7, ""), None);

        let short = grid(&[&["id", "name", "note"], &["1", "Ada"]]);
        let horizontal = TabularAccessor::new(&short, HeaderOrientation::Horizontal);
        assert_eq!(horizontal.find_record(2, ""), None);

        let vertical = grid(&[&["id", "1", "2"], &["note"]]);
        let accessor = TabularAccessor::new(&vertical, HeaderOrientation::Vertical);
        assert_eq!(accessor.find_record(1, ""), None);
        assert_eq!(accessor.find_record(0, "2"), Some(2));
    }

    #[test]
    fn index_of_is_exact_and_first_match() {
        let header = vec!["id", "name ", "name", "name"];
        assert_eq!(index_of(&header, "name"), Some(2));
        assert_eq!(index_of(&header, "Name"), None);
        assert_eq!(index_of(&header, "id "), None);
    }

    #[test]
    fn cell_defaults_to_empty() {
        let record = vec!["1", "Ada"];
        assert_eq!(cell(&record, 1), "Ada");
        assert_eq!(cell(&record, 7), "");
    }

    #[test]
    fn orientation_serde_is_lowercase() {
        let json = serde_json::to_string(&HeaderOrientation::Vertical).unwrap();
        assert_eq!(json, "\"vertical\"");
        let parsed: HeaderOrientation = serde_json::from_str("\"horizontal\"").unwrap();
        assert_eq!(parsed, HeaderOrientation::Horizontal);
    }
}
