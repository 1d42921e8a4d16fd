//! sheetnav - spreadsheet-driven button navigation and leaderboard tables
//!
//! A page is configured from a remote spreadsheet:
//! - row 1 holds the page title, row 2 a list of external links
//! - rows 3+ describe a tree of navigation buttons
//! - leaf buttons load another sheet, rendered as a ranked, filterable table
//!
//! The decoding, navigation and filtering logic is host-agnostic; the `web`
//! layer (wasm32 only) binds it to the DOM and `fetch`.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { SheetNav } from 'sheetnav';
//! await init();
//! const nav = new SheetNav({ baseURL: "https://example.com/exec" });
//! await nav.start();
//! ```

// Data decoding
pub mod buttons;
pub mod cell_ref;
pub mod filter;
pub mod grid;
pub mod remote;
pub mod sheet;
pub mod table;

// Application state and ambient concerns
pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod navigation;

// DOM binding
#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use web::SheetNav;

pub use buttons::{build_button_forest, ButtonDef, ButtonForest};
pub use config::SheetNavConfig;
pub use error::{ErrorKind, Result, SheetNavError};
pub use filter::{filter_rows, parse_keywords, LeaderboardCache};
pub use grid::{Grid, SparseCellMap};
pub use navigation::{ClickOutcome, NavigationController, NavigationState, NavigationSurface};
pub use sheet::{decode_sheet, LinkEntry, SheetLayout};
pub use table::{TableCell, TablePlaceholder, TableView};

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Decode a button configuration response and return the page layout as
/// a JSON string.
///
/// # Arguments
/// * `response_json` - The provider response, `{"buttonLayout": {...}}`
///
/// # Errors
/// Returns an error if the response is not JSON or has no `buttonLayout` map.
#[wasm_bindgen]
pub fn decode_sheet_json(response_json: &str) -> std::result::Result<String, JsValue> {
    let response: serde_json::Value = serde_json::from_str(response_json).map_err(js_err)?;
    let cells = remote::extract_button_layout(response).map_err(js_err)?;
    let layout = decode_sheet(&Grid::from_sparse(&cells).map_err(js_err)?);

    serde_json::to_string(&layout)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Filter a grid (JSON array of rows) by comma-separated keywords and
/// return the result as a JSON string.
///
/// # Errors
/// Returns an error if `grid_json` is not an array of string arrays.
#[wasm_bindgen]
pub fn filter_grid_json(grid_json: &str, keywords: &str) -> std::result::Result<String, JsValue> {
    let grid: Grid = serde_json::from_str(grid_json).map_err(js_err)?;
    let filtered = filter_rows(&grid, &parse_keywords(keywords));

    serde_json::to_string(&filtered)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
