//! Render model for the ranked data table.
//!
//! The page layer draws whatever [`TableView`] describes: a synthetic "Rank"
//! column ahead of the grid's header, 1-based ranks for data rows, and URL
//! cells collapsed into a "Link" anchor carrying the full URL as tooltip.

use serde::Serialize;

use crate::grid::Grid;

pub const RANK_HEADER: &str = "Rank";
pub const LINK_TEXT: &str = "Link";
pub const LOADING_MESSAGE: &str = "Loading data...";
/// Placeholders span the whole table regardless of its real width.
pub const PLACEHOLDER_COLSPAN: u32 = 100;

/// One rendered data cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TableCell {
    /// Plain text, rendered untrimmed.
    Text { text: String },
    /// `http(s)` URL, rendered as a "Link" anchor opening in a new tab.
    Link { url: String },
}

impl TableCell {
    pub fn from_value(value: &str) -> Self {
        let trimmed = value.trim();
        if is_http_url(trimmed) {
            Self::Link {
                url: trimmed.to_string(),
            }
        } else {
            Self::Text {
                text: value.to_string(),
            }
        }
    }

    /// Visible text of the cell.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Text { text } => text,
            Self::Link { .. } => LINK_TEXT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub rank: usize,
    pub cells: Vec<TableCell>,
}

/// Header and body of the ranked table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl TableView {
    /// Build the view for `grid`, whose row 0 is the header.
    pub fn from_grid(grid: &Grid) -> Self {
        let headers = std::iter::once(RANK_HEADER.to_string())
            .chain(grid.header().unwrap_or_default().iter().cloned())
            .collect();

        let rows = grid
            .rows()
            .iter()
            .skip(1)
            .enumerate()
            .map(|(i, row)| TableRow {
                rank: i + 1,
                cells: row.iter().map(|v| TableCell::from_value(v)).collect(),
            })
            .collect();

        Self { headers, rows }
    }
}

/// Message shown in place of the table while a load is pending or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TablePlaceholder {
    Loading,
    Error(String),
}

impl TablePlaceholder {
    pub fn message(&self) -> String {
        match self {
            Self::Loading => LOADING_MESSAGE.to_string(),
            Self::Error(reason) => format!(
                "Error loading table: {reason}. Please check data formatting or range errors."
            ),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// True for values starting with `http://` or `https://`, any case.
pub fn is_http_url(value: &str) -> bool {
    let has_prefix = |prefix: &str| {
        value
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };
    has_prefix("http://") || has_prefix("https://")
}
