//! Dense grids built from sparse, address-keyed cell maps.
//!
//! The remote provider delivers each sheet as a JSON object keyed by cell
//! address (`{"A1": "Name", "B1": "Score", ...}`). [`Grid::from_sparse`] turns
//! that into a rectangular `rows x cols` grid, back-filling every address the
//! map does not mention with an empty string.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cell_ref::parse_cell_address;
use crate::error::{Result, SheetNavError};

/// Last addressable row (spreadsheet limit).
pub const MAX_ROWS: u32 = 1_048_576;
/// Last addressable column, `XFD`.
pub const MAX_COLS: u32 = 16_384;
/// Upper bound on `rows x cols` of a dense grid.
pub const MAX_GRID_CELLS: u64 = 1 << 21;

/// Address-keyed cell values exactly as received from the provider.
pub type SparseCellMap = serde_json::Map<String, Value>;

/// Rectangular, 0-indexed grid of cell strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Build a dense grid from a sparse cell map.
    ///
    /// Keys that are not strict cell addresses, or that lie past
    /// [`MAX_ROWS`]/[`MAX_COLS`], are ignored. The grid is sized to the
    /// largest row and column kept; a map without any kept key yields an
    /// empty grid.
    ///
    /// # Errors
    /// [`SheetNavError::Response`] when the dense grid would exceed
    /// [`MAX_GRID_CELLS`] cells.
    pub fn from_sparse(cells: &SparseCellMap) -> Result<Self> {
        let mut out_of_range = 0_usize;
        let addressed: Vec<(u32, u32, &Value)> = cells
            .iter()
            .filter_map(|(key, value)| {
                let (row, col) = parse_cell_address(key)?;
                if row > MAX_ROWS || col > MAX_COLS {
                    out_of_range += 1;
                    return None;
                }
                Some((row, col, value))
            })
            .collect();
        if out_of_range > 0 {
            log::warn!("ignored {out_of_range} cells beyond {MAX_COLS} columns or {MAX_ROWS} rows");
        }

        let max_row = addressed.iter().map(|&(row, _, _)| row).max().unwrap_or(0);
        let max_col = addressed.iter().map(|&(_, col, _)| col).max().unwrap_or(0);
        if u64::from(max_row) * u64::from(max_col) > MAX_GRID_CELLS {
            return Err(SheetNavError::Response(format!(
                "sheet spans {max_row} rows x {max_col} columns, more than {MAX_GRID_CELLS} cells"
            )));
        }

        let width = max_col as usize;
        let mut rows = vec![vec![String::new(); width]; max_row as usize];
        for (row, col, value) in addressed {
            if let Some(slot) = rows
                .get_mut(row as usize - 1)
                .and_then(|r| r.get_mut(col as usize - 1))
            {
                *slot = cell_text(value);
            }
        }

        Ok(Self { rows })
    }

    /// Wrap already-dense rows. Short rows are padded so the grid stays
    /// rectangular.
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { rows }
    }

    #[cfg(test)]
    pub(crate) fn from_strs<R: AsRef<[&'static str]>>(rows: &[R]) -> Self {
        Self::from_rows(
            rows.iter()
                .map(|r| r.as_ref().iter().map(|s| (*s).to_string()).collect())
                .collect(),
        )
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Cell at 0-indexed `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (0 for an empty grid).
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row, treated as the header by every consumer.
    pub fn header(&self) -> Option<&[String]> {
        self.row(0)
    }

    /// Rows `start..` with the first `skip_cols` columns removed.
    pub(crate) fn slice_from(&self, start: usize, skip_cols: usize) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .skip(start)
                .map(|r| r.iter().skip(skip_cols).cloned().collect())
                .collect(),
        }
    }
}

/// String form of a raw cell value.
///
/// Strings are stored verbatim, `null` becomes empty, and anything else keeps
/// its JSON text (`10`, `true`, `[1,2]`).
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sparse(value: Value) -> SparseCellMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_dimensions_follow_max_row_and_col() {
        let grid = Grid::from_sparse(&sparse(json!({"A1": "x", "C2": "y"}))).unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(
            grid.rows(),
            &[
                vec!["x".to_string(), String::new(), String::new()],
                vec![String::new(), String::new(), "y".to_string()],
            ]
        );
    }

    #[test]
    fn test_non_address_keys_ignored() {
        let grid = Grid::from_sparse(&sparse(json!({
            "B2": "kept",
            "range": "A1:B2",
            "b3": "lowercase",
            "Z": "no row",
        })))
        .unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.cell(1, 1), Some("kept"));
        assert_eq!(grid.cell(0, 0), Some(""));
    }

    #[test]
    fn test_no_valid_keys_yields_empty_grid() {
        let grid = Grid::from_sparse(&sparse(json!({"title": "nope"}))).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.width(), 0);
        assert!(Grid::from_sparse(&SparseCellMap::new()).unwrap().is_empty());
    }

    #[test]
    fn test_non_string_values_stringified() {
        let grid = Grid::from_sparse(&sparse(json!({
            "A1": 10,
            "B1": 2.5,
            "C1": true,
            "D1": null,
        })))
        .unwrap();
        assert_eq!(grid.row(0).unwrap(), &["10", "2.5", "true", ""]);
    }

    #[test]
    fn test_oversized_sheets() {
        // Past the addressable range: dropped.
        let grid = Grid::from_sparse(&sparse(json!({
            "A1": "Name",
            "A4000000000": "x",
            "XFE1": "y",
        })))
        .unwrap();
        assert_eq!(grid.height(), 1);
        assert_eq!(grid.width(), 1);

        // Addressable but too large to materialise: rejected.
        let err = Grid::from_sparse(&sparse(json!({"A1": "Name", "XFD1048576": "x"}))).unwrap_err();
        assert!(matches!(err, SheetNavError::Response(_)), "{err:?}");
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let grid = Grid::from_strs(&[vec!["a", "b"], vec!["c"]]);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.cell(1, 1), Some(""));
    }

    #[test]
    fn test_slice_from() {
        let grid = Grid::from_strs(&[["a", "b", "c"], ["d", "e", "f"], ["g", "h", "i"]]);
        let sliced = grid.slice_from(1, 1);
        assert_eq!(sliced, Grid::from_strs(&[["e", "f"], ["h", "i"]]));
        assert!(grid.slice_from(5, 1).is_empty());
    }

    #[test]
    fn test_serializes_as_nested_arrays() {
        let grid = Grid::from_strs(&[["Name", "Score"]]);
        assert_eq!(
            serde_json::to_string(&grid).unwrap(),
            r#"[["Name","Score"]]"#
        );
    }
}
