//! Test fixtures for building provider responses in memory.
//!
//! # Example
//!
//! ```rust
//! use fixtures::SheetBuilder;
//!
//! let response = SheetBuilder::new()
//!     .title("Leaderboards")
//!     .table_row(0, &["Button ID", "Parent ID", "Button Label", "Data", "Action"])
//!     .button_layout_response();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::cast_possible_truncation
)]

use serde_json::{json, Value};
use sheetnav::cell_ref::format_cell_address;
use sheetnav::grid::{Grid, SparseCellMap};

/// Required button table header, in the usual column order.
pub const BUTTON_HEADER: [&str; 5] = ["Button ID", "Parent ID", "Button Label", "Data", "Action"];

// ============================================================================
// Sheet Builder
// ============================================================================

/// Builder for sparse, address-keyed sheets laid out like a configuration
/// sheet: title in B2, links in row 3, table from row 4, column A ignored.
#[derive(Debug, Default, Clone)]
pub struct SheetBuilder {
    cells: SparseCellMap,
}

impl SheetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a raw cell by address.
    pub fn cell(mut self, address: &str, value: impl Into<Value>) -> Self {
        self.cells.insert(address.to_string(), value.into());
        self
    }

    /// Set the page title (B2).
    pub fn title(self, title: &str) -> Self {
        self.cell("B2", title)
    }

    /// Put a link object in the `index`-th link cell (B3, C3, ...).
    pub fn link(self, index: u32, label: &str, url: &str, text: &str, colour: &str) -> Self {
        let cell = json!({"label": label, "link": url, "text": text, "colour": colour});
        self.raw_link(index, &cell.to_string())
    }

    /// Put arbitrary text in the `index`-th link cell.
    pub fn raw_link(self, index: u32, text: &str) -> Self {
        let address = format_cell_address(3, index + 2);
        self.cell(&address, text)
    }

    /// Write `values` into table row `index` (row 4 + index), from column B.
    pub fn table_row(mut self, index: u32, values: &[&str]) -> Self {
        for (col, value) in values.iter().enumerate() {
            let address = format_cell_address(4 + index, col as u32 + 2);
            self.cells.insert(address, Value::from(*value));
        }
        self
    }

    /// Header plus one table row per button `(id, parent, label, data, action)`.
    pub fn buttons(self, buttons: &[[&str; 5]]) -> Self {
        let mut builder = self.table_row(0, &BUTTON_HEADER);
        for (i, button) in buttons.iter().enumerate() {
            builder = builder.table_row(i as u32 + 1, button);
        }
        builder
    }

    pub fn build(self) -> SparseCellMap {
        self.cells
    }

    /// `{"buttonLayout": cells}`
    pub fn button_layout_response(self) -> Value {
        json!({ "buttonLayout": Value::Object(self.cells) })
    }

    /// `{name: cells}` as returned by a data load.
    pub fn data_response(self, name: &str) -> Value {
        let mut sheets = serde_json::Map::new();
        sheets.insert(name.to_string(), Value::Object(self.cells));
        Value::Object(sheets)
    }
}

/// Dense grid from string literals.
pub fn grid<R: AsRef<[&'static str]>>(rows: &[R]) -> Grid {
    Grid::from_rows(
        rows.iter()
            .map(|r| r.as_ref().iter().map(|s| (*s).to_string()).collect())
            .collect(),
    )
}

/// A plain data sheet: `rows` written from A1 with no layout offsets.
pub fn data_sheet(rows: &[&[&str]]) -> SparseCellMap {
    let mut cells = SparseCellMap::new();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            let address = format_cell_address(r as u32 + 1, c as u32 + 1);
            cells.insert(address, Value::from(*value));
        }
    }
    cells
}

/// Three-level configuration used across the navigation tests.
///
/// ```text
/// 1 Games ──┬── 11 Platformers ── 111 Any%  (load any)
///           └── 12 Puzzle        (load puzzle)
/// 2 Overall (load overall)
/// ```
pub fn sample_layout() -> SheetBuilder {
    SheetBuilder::new()
        .title("Speedrun Boards")
        .link(0, "Rules", "https://example.com/rules", "black", "yellow")
        .buttons(&[
            ["1", "ROOT", "Games", "", ""],
            ["2", "ROOT", "Overall", "overall", "load data"],
            ["11", "1", "Platformers", "", ""],
            ["12", "1", "Puzzle", "puzzle", "Load Data"],
            ["111", "11", "Any%", "any", "load data"],
        ])
}
