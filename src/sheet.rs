//! Sheet layout decoding.
//!
//! A configuration sheet follows a fixed layout, always ignoring column A:
//!
//! | Row | Content                                   |
//! |-----|-------------------------------------------|
//! | 2   | page title in column B                    |
//! | 3   | one JSON link object per cell, from B on  |
//! | 4+  | tabular data (button table) from B on     |

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetNavError};
use crate::grid::Grid;

const TITLE_ROW: usize = 1;
const TITLE_COL: usize = 1;
const LINK_ROW: usize = 2;
const TABLE_START_ROW: usize = 3;
/// Column A carries row labels for the sheet editors and is never decoded.
const SKIPPED_COLS: usize = 1;

/// A "top links" entry decoded from one link-row cell.
///
/// Cell JSON looks like
/// `{"label":"Rules","link":"https://example.com","text":"black","colour":"yellow"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub label: String,
    pub link: String,
    /// Text colour, any CSS colour value.
    #[serde(rename = "text", default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    /// Background colour, any CSS colour value.
    #[serde(rename = "colour", default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// Named regions of a decoded configuration sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetLayout {
    /// Cell B2, if the grid has one.
    pub title: Option<String>,
    pub external_links: Vec<LinkEntry>,
    pub table_data: Grid,
}

/// Decode one link-row cell.
pub fn decode_link(cell: &str) -> Result<LinkEntry> {
    serde_json::from_str(cell).map_err(|source| SheetNavError::LinkParse {
        cell: cell.to_string(),
        source,
    })
}

/// Slice a grid into title, links and table data.
///
/// Short grids simply produce empty regions. Link cells that fail to decode
/// are logged and dropped.
pub fn decode_sheet(grid: &Grid) -> SheetLayout {
    let title = grid.cell(TITLE_ROW, TITLE_COL).map(str::to_string);

    let external_links: Vec<LinkEntry> = grid
        .row(LINK_ROW)
        .map(|row| {
            row.iter()
                .skip(SKIPPED_COLS)
                .filter_map(|cell| match decode_link(cell) {
                    Ok(link) => Some(link),
                    Err(e) if cell.trim().is_empty() => {
                        log::debug!("skipping blank link cell: {e}");
                        None
                    }
                    Err(e) => {
                        log::warn!("{e}");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let table_data = grid.slice_from(TABLE_START_ROW, SKIPPED_COLS);

    log::debug!(
        "decoded sheet: {} external links, {} table rows",
        external_links.len(),
        table_data.height()
    );

    SheetLayout {
        title,
        external_links,
        table_data,
    }
}
