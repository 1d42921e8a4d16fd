//! Remote sheet provider: request URLs and response shapes.
//!
//! Every request is `GET {base_url}?sheets={key}`. Data loads answer with
//! `{ "<sheet name>": SparseCellMap }`; the configuration load answers with
//! `{ "buttonLayout": SparseCellMap }`. Shapes are checked only as far as
//! needed to find the cell map.

use serde_json::Value;

use crate::error::{Result, SheetNavError};
use crate::grid::{Grid, SparseCellMap};

/// Sheet key of the button configuration.
pub const BUTTON_LAYOUT_SHEET: &str = "buttonLayout";

/// URL for loading the sheet named `sheet_key`.
pub fn sheet_url(base_url: &str, sheet_key: &str) -> String {
    format!("{}?sheets={}", base_url.trim(), sheet_key)
}

/// URL for loading the button configuration.
pub fn button_layout_url(base_url: &str) -> String {
    sheet_url(base_url, BUTTON_LAYOUT_SHEET)
}

/// Cell map of the button configuration response.
pub fn extract_button_layout(response: Value) -> Result<SparseCellMap> {
    let Value::Object(mut sheets) = response else {
        return Err(SheetNavError::Response(
            "configuration response is not an object".to_string(),
        ));
    };
    match sheets.remove(BUTTON_LAYOUT_SHEET) {
        Some(Value::Object(cells)) => Ok(cells),
        Some(_) => Err(SheetNavError::Response(format!(
            "{BUTTON_LAYOUT_SHEET} is not a cell map"
        ))),
        None => Err(SheetNavError::Response(format!(
            "configuration response has no {BUTTON_LAYOUT_SHEET} key"
        ))),
    }
}

/// Name and cell map of the first sheet in a data response.
pub fn extract_first_sheet(response: Value) -> Result<(String, SparseCellMap)> {
    let Value::Object(sheets) = response else {
        return Err(SheetNavError::Response(
            "data response is not an object".to_string(),
        ));
    };
    match sheets.into_iter().next() {
        Some((name, Value::Object(cells))) => Ok((name, cells)),
        Some((name, _)) => Err(SheetNavError::Response(format!(
            "sheet {name:?} is not a cell map"
        ))),
        None => Err(SheetNavError::Response(
            "data response contains no sheet".to_string(),
        )),
    }
}

/// Dense grid of a data response. A sheet without any cell is an error
/// since the table needs at least a header row.
pub fn decode_data_response(response: Value) -> Result<Grid> {
    let (name, cells) = extract_first_sheet(response)?;
    let grid = Grid::from_sparse(&cells)?;
    if grid.is_empty() {
        return Err(SheetNavError::Response(format!(
            "sheet {name:?} contains no cells"
        )));
    }
    log::debug!(
        "sheet {name:?}: {} rows x {} columns",
        grid.height(),
        grid.width()
    );
    Ok(grid)
}

#[cfg(target_arch = "wasm32")]
pub use fetch::{fetch_button_layout, fetch_json, fetch_sheet};

#[cfg(target_arch = "wasm32")]
mod fetch {
    use serde_json::Value;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    use super::{button_layout_url, decode_data_response, extract_button_layout, sheet_url};
    use crate::error::{Result, SheetNavError};
    use crate::grid::{Grid, SparseCellMap};

    fn js_error_message(err: JsValue, fallback: &str) -> String {
        if let Some(message) = err.as_string() {
            return message;
        }
        if let Ok(error) = err.dyn_into::<js_sys::Error>() {
            return error.message().into();
        }
        fallback.to_string()
    }

    fn transport(err: JsValue) -> SheetNavError {
        SheetNavError::Transport(js_error_message(err, "Request failed"))
    }

    /// GET `url` and parse the body as JSON.
    pub async fn fetch_json(url: &str) -> Result<Value> {
        let window = web_sys::window()
            .ok_or_else(|| SheetNavError::Transport("no window available".to_string()))?;
        let response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(transport)?;
        let response: web_sys::Response = response.dyn_into().map_err(transport)?;
        let text = JsFuture::from(response.text().map_err(transport)?)
            .await
            .map_err(transport)?
            .as_string()
            .unwrap_or_default();
        if !response.ok() {
            return Err(SheetNavError::Transport(format!(
                "HTTP {} {}",
                response.status(),
                response.status_text()
            )));
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch the button configuration cell map.
    pub async fn fetch_button_layout(base_url: &str) -> Result<SparseCellMap> {
        let url = button_layout_url(base_url);
        log::info!("Fetching button configuration from: {url}");
        let response = fetch_json(&url).await?;
        extract_button_layout(response)
    }

    /// Fetch and decode the sheet named `sheet_key`.
    pub async fn fetch_sheet(base_url: &str, sheet_key: &str) -> Result<Grid> {
        let url = sheet_url(base_url, sheet_key);
        log::info!("Fetching data from: {url}");
        let response = fetch_json(&url).await?;
        decode_data_response(response)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_urls() {
        assert_eq!(
            sheet_url(" https://example.com/exec ", "leaderboards-A1"),
            "https://example.com/exec?sheets=leaderboards-A1"
        );
        assert_eq!(
            button_layout_url("https://example.com/exec"),
            "https://example.com/exec?sheets=buttonLayout"
        );
    }

    #[test]
    fn test_extract_button_layout() {
        let cells = extract_button_layout(json!({"buttonLayout": {"B2": "Title"}})).unwrap();
        assert_eq!(cells.get("B2"), Some(&json!("Title")));

        assert!(extract_button_layout(json!({"other": {}})).is_err());
        assert!(extract_button_layout(json!({"buttonLayout": "x"})).is_err());
        assert!(extract_button_layout(json!([1, 2])).is_err());
    }

    #[test]
    fn test_extract_first_sheet_keeps_response_order() {
        let response: Value =
            serde_json::from_str(r#"{"zeta": {"A1": "z"}, "alpha": {"A1": "a"}}"#).unwrap();
        let (name, cells) = extract_first_sheet(response).unwrap();
        assert_eq!(name, "zeta");
        assert_eq!(cells.get("A1"), Some(&json!("z")));
    }

    #[test]
    fn test_decode_data_response() {
        let grid = decode_data_response(json!({
            "scores": {"A1": "Name", "B1": "Score", "A2": "Alice", "B2": 10}
        }))
        .unwrap();
        assert_eq!(grid, Grid::from_strs(&[["Name", "Score"], ["Alice", "10"]]));

        assert!(decode_data_response(json!({})).is_err());
        assert!(decode_data_response(json!({"scores": {}})).is_err());
        assert!(decode_data_response(json!({"scores": "error"})).is_err());
    }
}
